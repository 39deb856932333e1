//! The ragged fixture itself.
//!
//! Sibling collections deliberately differ in length: `arrays` holds
//! sequences of 3, 2 and 4 items, `names` has three entries while `ages`
//! has two, and `mixed_types` ends in a nested ragged list.

use crate::value::FixtureValue;

/// File name the generator writes into the working directory.
pub const FIXTURE_FILE_NAME: &str = "ragged_data.pkl";

/// Build the Mapping Root.
pub fn ragged_data() -> FixtureValue {
    FixtureValue::map([
        (
            "arrays",
            FixtureValue::List(vec![
                FixtureValue::ints([1, 2, 3]),
                FixtureValue::ints([4, 5]),
                FixtureValue::ints([6, 7, 8, 9]),
            ]),
        ),
        (
            "nested_dict",
            FixtureValue::map([
                ("names", FixtureValue::strs(["Alice", "Bob", "Charlie"])),
                // shorter than `names` on purpose
                ("ages", FixtureValue::ints([25, 30])),
                (
                    "addresses",
                    FixtureValue::map([
                        ("Alice", "123 Main St".into()),
                        ("Bob", "456 Oak Ave".into()),
                    ]),
                ),
            ]),
        ),
        (
            "mixed_types",
            FixtureValue::List(vec![
                FixtureValue::ints([1, 2, 3]),
                "a string".into(),
                FixtureValue::map([("key", "value".into())]),
                FixtureValue::List(vec![FixtureValue::ints([1, 2]), FixtureValue::ints([3, 4, 5])]),
            ]),
        ),
    ])
}

/// Confirmation line printed after writing `file_name`.
pub fn confirmation(file_name: &str) -> String {
    format!("Created {file_name}")
}
