//! Tri-state presence tracking for optional document fields.

/// Presence state of one optional field of an orientation document.
///
/// A field that was never in the source document stays `Absent` until
/// default resolution runs, so saving an untouched instance reproduces
/// the original key set instead of spraying defaults into the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field<T> {
    /// Key was not present in the source document.
    Absent,
    /// Filled in by default resolution; omitted again on save.
    Defaulted(T),
    /// Carried an explicit value in the document, or was set by the editor.
    Explicit(T),
}

// Absent regardless of T, so containers of fields can derive Default.
impl<T> Default for Field<T> {
    fn default() -> Self {
        Field::Absent
    }
}

impl<T> Field<T> {
    /// Current value, whether explicit or defaulted.
    pub fn get(&self) -> Option<&T> {
        match self {
            Field::Absent => None,
            Field::Defaulted(v) | Field::Explicit(v) => Some(v),
        }
    }

    /// Value only if it came from the document or the editor.
    pub fn explicit(&self) -> Option<&T> {
        match self {
            Field::Explicit(v) => Some(v),
            _ => None,
        }
    }

    /// True when no value is available at all.
    pub fn is_absent(&self) -> bool {
        matches!(self, Field::Absent)
    }

    /// Install `default` if the field is still absent. No-op otherwise,
    /// which is what makes default resolution idempotent.
    pub fn or_default(&mut self, default: T) {
        if self.is_absent() {
            *self = Field::Defaulted(default);
        }
    }

    /// Overwrite with an editor-supplied value.
    pub fn set(&mut self, value: T) {
        *self = Field::Explicit(value);
    }

    /// Clear back to the not-in-document state.
    pub fn clear(&mut self) {
        *self = Field::Absent;
    }
}

impl<T: Clone> Field<T> {
    /// Current value or `fallback`, by clone.
    pub fn value_or(&self, fallback: T) -> T {
        self.get().cloned().unwrap_or(fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn or_default_only_fills_absent() {
        let mut f: Field<u32> = Field::Absent;
        f.or_default(3);
        assert_eq!(f, Field::Defaulted(3));

        f.or_default(9);
        assert_eq!(f, Field::Defaulted(3));

        let mut g = Field::Explicit(7);
        g.or_default(3);
        assert_eq!(g, Field::Explicit(7));
    }

    #[test]
    fn explicit_filters_defaulted_values() {
        assert_eq!(Field::Defaulted(1).explicit(), None);
        assert_eq!(Field::Explicit(1).explicit(), Some(&1));
        assert_eq!(Field::<u32>::Absent.get(), None);
    }
}
