//! Calendar data utilities shared with the rendered component

pub mod bucket;

pub use bucket::{
    bucket_by_date, BucketMap, BucketedRecord, DateRecord, DateValue, InvalidDateError,
    DEFAULT_BUCKET_FORMAT,
};
