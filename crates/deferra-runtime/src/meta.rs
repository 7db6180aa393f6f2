/// Metadata resolved alongside every deferred value.
///
/// `secret` marks sensitive values and survives every combination (OR).
/// `known` is false for placeholders produced during a preview; a combination
/// is known only if all of its parts are (AND).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueMeta {
  pub secret: bool,
  pub known: bool,
}

impl ValueMeta {
  /// A plain, fully known value.
  pub const KNOWN: Self = Self {
    secret: false,
    known: true,
  };

  /// A fully known secret value.
  pub const SECRET: Self = Self {
    secret: true,
    known: true,
  };

  /// A preview placeholder.
  pub const UNKNOWN: Self = Self {
    secret: false,
    known: false,
  };

  pub const fn combine(self, other: Self) -> Self {
    Self {
      secret: self.secret || other.secret,
      known: self.known && other.known,
    }
  }

  /// Combine any number of metas. The empty combination is [`ValueMeta::KNOWN`].
  pub fn combine_all(metas: impl IntoIterator<Item = Self>) -> Self {
    metas.into_iter().fold(Self::KNOWN, Self::combine)
  }
}

impl Default for ValueMeta {
  fn default() -> Self {
    Self::KNOWN
  }
}
