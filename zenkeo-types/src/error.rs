pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Unknown {field} code: {value}")]
    UnknownCode { field: &'static str, value: u16 },

    #[error("{field} {value} outside {min}..={max}")]
    OutOfRange {
        field: &'static str,
        value: u16,
        min: u16,
        max: u16,
    },
}
