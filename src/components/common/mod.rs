mod fields;

pub use fields::{IntegerField, LinkField, RangeField};
