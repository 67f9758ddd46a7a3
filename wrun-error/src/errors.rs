// WRUN - wrun-error
// Module: Error Types
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

use core::fmt;

use crate::{codes, ToErrorCategory};

/// `Error` categories for wrun operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorCategory {
    /// Host engine setup errors
    Initialization = 1,
    /// Parameter errors (missing or malformed arguments)
    Parameter      = 2,
    /// I/O errors
    Io             = 3,
    /// Module compilation and validation errors
    Compilation    = 4,
    /// Import resolution and instantiation errors
    Link           = 5,
    /// Export lookup errors
    Export         = 6,
    /// Signature and value type errors
    Type           = 7,
    /// Memory-region access errors
    Memory         = 8,
    /// WebAssembly traps raised while guest code runs
    RuntimeTrap    = 9,
}

impl ErrorCategory {
    /// Short lowercase name used in log fields
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Initialization => "initialization",
            Self::Parameter => "parameter",
            Self::Io => "io",
            Self::Compilation => "compilation",
            Self::Link => "link",
            Self::Export => "export",
            Self::Type => "type",
            Self::Memory => "memory",
            Self::RuntimeTrap => "trap",
        }
    }
}

/// wrun `Error` type
///
/// Categorised error with a numeric code and a message. Unlike a static
/// message table the message is owned, so it can name the export, import
/// or argument that caused the failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    /// `Error` category
    pub category: ErrorCategory,
    /// `Error` code
    pub code:     u16,
    /// `Error` message
    pub message:  String,
}

impl Error {
    /// Create a new error.
    #[must_use]
    pub fn new(category: ErrorCategory, code: u16, message: impl Into<String>) -> Self {
        Self {
            category,
            code,
            message: message.into(),
        }
    }

    /// Check if this is an initialization error
    #[must_use]
    pub fn is_initialization_error(&self) -> bool {
        self.category == ErrorCategory::Initialization
    }

    /// Check if this is a parameter error
    #[must_use]
    pub fn is_parameter_error(&self) -> bool {
        self.category == ErrorCategory::Parameter
    }

    /// Check if this is an I/O error
    #[must_use]
    pub fn is_io_error(&self) -> bool {
        self.category == ErrorCategory::Io
    }

    /// Check if this is a compilation error
    #[must_use]
    pub fn is_compilation_error(&self) -> bool {
        self.category == ErrorCategory::Compilation
    }

    /// Check if this is a link error
    #[must_use]
    pub fn is_link_error(&self) -> bool {
        self.category == ErrorCategory::Link
    }

    /// Check if this is an export lookup error
    #[must_use]
    pub fn is_export_error(&self) -> bool {
        self.category == ErrorCategory::Export
    }

    /// Check if this is a type error
    #[must_use]
    pub fn is_type_error(&self) -> bool {
        self.category == ErrorCategory::Type
    }

    /// Check if this is a memory error
    #[must_use]
    pub fn is_memory_error(&self) -> bool {
        self.category == ErrorCategory::Memory
    }

    /// Check if this error is a trap raised by guest code
    #[must_use]
    pub fn is_trap(&self) -> bool {
        self.category == ErrorCategory::RuntimeTrap
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}][E{:04X}] {}", self.category, self.code, self.message)
    }
}

impl std::error::Error for Error {}

impl ToErrorCategory for Error {
    fn to_category(&self) -> ErrorCategory {
        self.category
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::new(ErrorCategory::Io, codes::IO_ERROR, err.to_string())
    }
}
