//! Formatting helpers shared across crates.

use std::fmt;

/// Wrapper around a slice that displays every item separated by `", "`.
#[derive(Debug, Clone, Copy)]
pub struct DisplayableSlice<'a, T> {
    items: &'a [T],
    open: &'static str,
    close: &'static str,
}

impl<'a, T> DisplayableSlice<'a, T> {
    /// Surround the items with the given delimiters, e.g. `("(", ")")`.
    pub const fn with_delimiters(mut self, open: &'static str, close: &'static str) -> Self {
        self.open = open;
        self.close = close;
        self
    }
}

impl<T> fmt::Display for DisplayableSlice<'_, T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.open)?;
        for (idx, item) in self.items.iter().enumerate() {
            if idx > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{item}")?;
        }
        write!(f, "{}", self.close)
    }
}

pub trait IntoDisplayableSlice<T> {
    fn displayable(&self) -> DisplayableSlice<'_, T>;
}

impl<T: fmt::Display> IntoDisplayableSlice<T> for [T] {
    fn displayable(&self) -> DisplayableSlice<'_, T> {
        DisplayableSlice {
            items: self,
            open: "",
            close: "",
        }
    }
}

impl<T: fmt::Display> IntoDisplayableSlice<T> for Vec<T> {
    fn displayable(&self) -> DisplayableSlice<'_, T> {
        self.as_slice().displayable()
    }
}
