use crate::{environment::prelude::ValueType, utils::prelude::SrcSpan};

#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeErrorType {
    NameError {
        name: String,
    },
    TypeError {
        operator: &'static str,
        operands: Vec<ValueType>,
    },
    ZeroDivisionError {
        operator: &'static str,
    },
    ValueError {
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeError {
    pub error: RuntimeErrorType,
    pub location: SrcSpan
}

impl RuntimeError {
    pub fn details(&self) -> (&'static str, Vec<String>) {
        match &self.error {
            RuntimeErrorType::NameError { name } => (
                "Name error",
                vec![format!("`{name}` is not defined")]
            ),
            RuntimeErrorType::TypeError { operator, operands } => {
                let operands = operands
                    .iter()
                    .map(|operand| format!("`{operand}`"))
                    .collect::<Vec<_>>()
                    .join(" and ");

                (
                    "Type error",
                    vec![format!("`{operator}` is not supported for {operands}")]
                )
            },
            RuntimeErrorType::ZeroDivisionError { operator } => (
                "Zero division error",
                vec![format!("`{operator}` by zero")]
            ),
            RuntimeErrorType::ValueError { reason } => (
                "Value error",
                vec![reason.clone()]
            ),
        }
    }
}

pub fn runtime_error<T>(error: RuntimeErrorType, location: SrcSpan) -> Result<T, RuntimeError> {
    Err(RuntimeError { error, location })
}
