use thiserror::Error;

/// The only failure the core surfaces: a coefficient or setting the analysis
/// cannot be run on. Classification and integration never fail once their
/// inputs have been validated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInput {
    #[error("Invalid input: coefficient {name} is missing.")]
    MissingCoefficient { name: &'static str },
    #[error("Invalid input: coefficient {name} must be a finite number (got {value}).")]
    NonFiniteCoefficient { name: &'static str, value: f64 },
    #[error("Invalid input: {reason}")]
    InvalidSettings { reason: String },
}

pub type Result<T> = std::result::Result<T, InvalidInput>;

#[cfg(test)]
mod tests {
    use super::InvalidInput;

    #[test]
    fn messages_name_the_offending_coefficient() {
        let missing = InvalidInput::MissingCoefficient { name: "b1" };
        assert_eq!(
            missing.to_string(),
            "Invalid input: coefficient b1 is missing."
        );

        let non_finite = InvalidInput::NonFiniteCoefficient {
            name: "a2",
            value: f64::NAN,
        };
        assert_eq!(
            non_finite.to_string(),
            "Invalid input: coefficient a2 must be a finite number (got NaN)."
        );
    }
}
