//! gridcalc_engine - Formula engine + Rhai integration.

pub mod engine;
pub mod error;

pub use error::{EngineError, ParseFailure};

#[cfg(test)]
mod tests {
    use crate::engine::*;

    #[test]
    fn test_from_a1_single_letter_columns() {
        let a1 = Position::from_a1("A1");
        assert_eq!(a1.row, 0);
        assert_eq!(a1.col, 0);

        let b1 = Position::from_a1("B1");
        assert_eq!(b1.row, 0);
        assert_eq!(b1.col, 1);

        let z1 = Position::from_a1("Z1");
        assert_eq!(z1.row, 0);
        assert_eq!(z1.col, 25);
    }

    #[test]
    fn test_from_a1_multi_letter_columns() {
        assert_eq!(Position::from_a1("AA1").col, 26);
        assert_eq!(Position::from_a1("AB1").col, 27);
        assert_eq!(Position::from_a1("AZ1").col, 51);
        assert_eq!(Position::from_a1("BA1").col, 52);
    }

    #[test]
    fn test_from_a1_row_numbers() {
        assert_eq!(Position::from_a1("A1").row, 0);
        assert_eq!(Position::from_a1("A10").row, 9);
        assert_eq!(Position::from_a1("A100").row, 99);
        assert_eq!(Position::from_a1("AA123"), Position::new(122, 26));
    }

    #[test]
    fn test_from_a1_invalid_inputs() {
        for input in ["", "123", "ABC", "A0", "1A", "A 1", "A1B", "$A$1", "A-1"] {
            assert_eq!(Position::from_a1(input), Position::NONE, "{input}");
        }
    }

    #[test]
    fn test_round_trip_every_column() {
        for col in 0..Position::MAX_COLS {
            let pos = Position::new(col % 97, col);
            let text = pos.to_a1();
            assert_eq!(Position::from_a1(&text), pos);
            assert_eq!(Position::from_a1(&text).to_a1(), text);
        }
    }

    #[test]
    fn test_extract_references_empty() {
        assert!(extract_references("").is_empty());
        assert!(extract_references("10 + 20").is_empty());
    }

    #[test]
    fn test_extract_references_multiple() {
        let refs: Vec<Position> = extract_references("A1 + B1 + C2")
            .into_iter()
            .map(|t| t.position)
            .collect();
        assert_eq!(
            refs,
            vec![Position::new(0, 0), Position::new(0, 1), Position::new(1, 2)]
        );
    }

    #[test]
    fn test_extract_references_duplicates() {
        assert_eq!(extract_references("A1 + A1").len(), 2);
    }

    #[test]
    fn test_custom_engine_functions() {
        let mut engine = create_engine();
        engine.register_fn("double", |x: f64| x * 2.0);
        let parser = RhaiParser::with_engine(engine);

        struct Cells;
        impl CellLookup for Cells {
            fn lookup(&self, pos: Position) -> Option<Value> {
                (pos == Position::new(0, 0)).then(|| Value::from(21.0))
            }
        }

        let formula = Formula::parse("double(A1)", &parser).unwrap();
        assert_eq!(formula.evaluate(&Cells), Value::Number(42.0));
    }
}
