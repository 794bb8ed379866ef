//! Result-format serializers
//!
//! One module per wire format. TSV is the streaming format the select
//! driver emits; further formats plug in beside it.

pub mod tsv;

pub use tsv::{print_term, TsvEscape};
