//! Services over the record source. No terminal I/O.

pub mod services;
