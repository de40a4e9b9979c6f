macro_rules! impl_id {
    ($name:ident) => {
        /// The ID type $name.
        /// Equality is identity: two ids are equal only if they were handed out by the same
        /// call of the generator.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(usize);

        impl $name {
            /// Get the id as usize.
            #[inline]
            pub fn as_usize(&self) -> usize {
                self.0
            }
        }

        impl From<usize> for $name {
            fn from(index: usize) -> Self {
                Self(index)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

impl_id!(RegexStateId);

/// Hands out fresh [`RegexStateId`]s.
/// One generator is used for one compilation, so sibling fragments never share a state.
#[derive(Debug, Default)]
pub(crate) struct RegexStateIdGenerator {
    next: usize,
}

impl RegexStateIdGenerator {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Mint a new id that has never been returned before by this generator.
    #[inline]
    pub(crate) fn fresh(&mut self) -> RegexStateId {
        let id = RegexStateId(self.next);
        self.next += 1;
        id
    }

    /// The number of ids handed out so far.
    pub(crate) fn count(&self) -> usize {
        self.next
    }
}
