// SPDX-License-Identifier: MIT
//
// Errors produced while reading CSS color values and background-image
// expressions. Every parse failure is explicit: an unreadable gradient is
// never reported as "no stops".

use thiserror::Error;

/// Failure to read a computed CSS value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CssError {
    #[error("unexpected end of input")]
    UnexpectedEnd,

    #[error("unexpected character `{0}`")]
    UnexpectedChar(char),

    #[error("unexpected token `{0}`")]
    UnexpectedToken(String),

    #[error("invalid hex color `#{0}`")]
    InvalidHex(String),

    #[error("invalid number `{0}`")]
    InvalidNumber(String),

    #[error("unknown color keyword `{0}`")]
    UnknownColor(String),

    #[error("unknown function `{0}()`")]
    UnknownFunction(String),

    #[error("gradient has no color stops")]
    NoColorStops,

    #[error("trailing input after value: `{0}`")]
    TrailingInput(String),
}

/// Result alias for CSS parsing.
pub type Result<T> = std::result::Result<T, CssError>;
