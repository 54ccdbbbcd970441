use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Duration must not be empty.")]
    DurationEmpty,
    #[error("Invalid duration '{value}'.")]
    InvalidDurationFormat { value: String },
    #[error("Invalid duration '{value}': {source}")]
    InvalidDurationNumber {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Duration overflow.")]
    DurationOverflow,
    #[error("Invalid duration unit '{unit}'.")]
    InvalidDurationUnit { unit: String },
    #[error("Duration must be > 0.")]
    DurationZero,
    #[error("Invalid boolean '{value}'.")]
    InvalidBoolean { value: String },
    #[error("Invalid coordinate '{value}'. Expected 'lat,lng'.")]
    InvalidCoordinateFormat { value: String },
    #[error("Invalid coordinate '{value}': {source}")]
    InvalidCoordinateNumber {
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },
    #[error("Coordinate '{value}' is not a finite number.")]
    CoordinateNotFinite { value: String },
    #[error("Zoom must be between 0 and {max}.")]
    ZoomOutOfRange { max: u8 },
    #[error("Unknown command '{value}'. Type 'help' for the list of commands.")]
    UnknownCommand { value: String },
    #[error("Command '{command}' expects {expected}.")]
    MissingCommandArgument {
        command: &'static str,
        expected: &'static str,
    },
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
