mod og;

pub use og::OgResult;
