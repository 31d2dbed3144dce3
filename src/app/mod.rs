// Application layer: turns registry queries into printable output.

pub mod report;
