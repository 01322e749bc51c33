//! Configuration arguments advertised by a provider's `--extcap-config` output

use std::fmt;

/// Argument type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgType {
    /// Signed integer
    Integer,
    /// Unsigned integer
    Unsigned,
    /// 64-bit signed integer
    Long,
    /// Floating point number
    Double,
    /// Boolean flag
    Boolean,
    /// Drop-down choice
    Menu,
    /// Radio button choice
    Radio,
    /// Combo box choice
    Selector,
    /// Free text
    String,
    /// Multiple independent check boxes
    Multicheck,
    /// Type the parser did not recognize
    Unknown,
}

impl fmt::Display for ArgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ArgType::Integer => "int",
            ArgType::Unsigned => "unsigned",
            ArgType::Long => "long",
            ArgType::Double => "double",
            ArgType::Boolean => "boolean",
            ArgType::Menu => "menu",
            ArgType::Radio => "radio",
            ArgType::Selector => "selector",
            ArgType::String => "string",
            ArgType::Multicheck => "multicheck",
            ArgType::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Typed argument value (range bounds and defaults)
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Integer(i32),
    Unsigned(u32),
    Long(i64),
    Double(f64),
    Boolean(bool),
    String(String),
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::Integer(v) => write!(f, "{}", v),
            ArgValue::Unsigned(v) => write!(f, "{}", v),
            ArgValue::Long(v) => write!(f, "{}", v),
            ArgValue::Double(v) => write!(f, "{}", v),
            ArgValue::Boolean(v) => write!(f, "{}", v),
            ArgValue::String(s) => write!(f, "{}", s),
        }
    }
}

/// One selectable value of a menu, radio, selector or multicheck argument
#[derive(Debug, Clone, PartialEq)]
pub struct ValueOption {
    /// Value passed back to the provider
    pub call: String,
    /// Human-readable label
    pub display: String,
    /// Preselected value
    pub is_default: bool,
}

/// Configuration argument advertised by a provider
#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentDescriptor {
    /// Argument number, referenced by value sentences
    pub number: u32,
    /// Command-line flag (e.g., "--delay")
    pub call: String,
    /// Human-readable label
    pub display: String,
    /// Optional tooltip
    pub tooltip: Option<String>,
    /// Argument type
    pub arg_type: ArgType,
    /// Lower bound, if the provider declared a range
    pub range_start: Option<ArgValue>,
    /// Upper bound, if the provider declared a range
    pub range_end: Option<ArgValue>,
    /// Default value
    pub default_value: Option<ArgValue>,
    /// Selectable values
    pub values: Vec<ValueOption>,
}

impl ArgumentDescriptor {
    pub fn new<C: Into<String>, D: Into<String>>(
        number: u32,
        call: C,
        display: D,
        arg_type: ArgType,
    ) -> Self {
        Self {
            number,
            call: call.into(),
            display: display.into(),
            tooltip: None,
            arg_type,
            range_start: None,
            range_end: None,
            default_value: None,
            values: Vec::new(),
        }
    }

    pub fn with_range(mut self, start: ArgValue, end: ArgValue) -> Self {
        self.range_start = Some(start);
        self.range_end = Some(end);
        self
    }

    pub fn with_default(mut self, value: ArgValue) -> Self {
        self.default_value = Some(value);
        self
    }

    pub fn with_value<C: Into<String>, D: Into<String>>(
        mut self,
        call: C,
        display: D,
        is_default: bool,
    ) -> Self {
        self.values.push(ValueOption {
            call: call.into(),
            display: display.into(),
            is_default,
        });
        self
    }

    /// The preselected value option, if any
    pub fn default_option(&self) -> Option<&ValueOption> {
        self.values.iter().find(|v| v.is_default)
    }
}

impl fmt::Display for ArgumentDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ARG {} call={} display=\"{}\" type={}",
            self.number, self.call, self.display, self.arg_type
        )?;

        if let (Some(start), Some(end)) = (&self.range_start, &self.range_end) {
            write!(f, " range={}-{}", start, end)?;
        }

        for value in &self.values {
            let marker = if value.is_default { "*" } else { "" };
            write!(
                f,
                " {}value call=\"{}\" display=\"{}\"",
                marker, value.call, value.display
            )?;
        }

        Ok(())
    }
}
