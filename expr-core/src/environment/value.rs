use std::fmt::Display;

pub const TRUE: Value = Value::Boolean { value: true };
pub const FALSE: Value = Value::Boolean { value: false };

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer { value: i64 },
    Float { value: f64 },
    Boolean { value: bool },
    Tuple { elements: Vec<Value> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Integer,
    Float,
    Boolean,
    Tuple,
}

impl Value {
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Integer { .. } => ValueType::Integer,
            Value::Float { .. } => ValueType::Float,
            Value::Boolean { .. } => ValueType::Boolean,
            Value::Tuple { .. } => ValueType::Tuple,
        }
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Integer { value } => *value != 0,
            Value::Float { value } => *value != 0.0,
            Value::Boolean { value } => *value,
            Value::Tuple { elements } => !elements.is_empty(),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Integer { value } => write!(f, "{value}"),
            // floats always render a fractional part so `6 / 2` reads `3.0`
            Value::Float { value } => {
                if value.fract() == 0.0 && value.is_finite() {
                    write!(f, "{value:.1}")
                } else {
                    write!(f, "{value}")
                }
            },
            Value::Boolean { value } => {
                write!(f, "{}", if *value { "True" } else { "False" })
            },
            Value::Tuple { elements } => {
                match elements.as_slice() {
                    [] => write!(f, "()"),
                    [single] => write!(f, "({single},)"),
                    elements => {
                        let rendered = elements
                            .iter()
                            .map(|element| element.to_string())
                            .collect::<Vec<_>>()
                            .join(", ");

                        write!(f, "({rendered})")
                    }
                }
            }
        }
    }
}

impl Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ValueType::Integer => "int",
            ValueType::Float => "float",
            ValueType::Boolean => "bool",
            ValueType::Tuple => "tuple",
        };

        write!(f, "{name}")
    }
}
