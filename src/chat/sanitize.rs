//! HTML sanitizing for anything that ends up in the transcript.
use std::fmt;

use serde::Serialize;

/// HTML that has been through `sanitize`. The only ways to get one are
/// sanitizing a string or taking a prefix of an existing value, so
/// holding a `SanitizedHtml` means it is safe to render.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SanitizedHtml(String);

impl SanitizedHtml {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The first `len` bytes. Callers must cut on a boundary that does
    /// not split a tag or character reference.
    pub(crate) fn prefix(&self, len: usize) -> SanitizedHtml {
        SanitizedHtml(self.0[..len].to_string())
    }
}

impl fmt::Display for SanitizedHtml {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SanitizedHtml {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Strip script-executing markup while keeping benign inline markup.
///
/// `<script>` and `<style>` are dropped together with their contents,
/// event handler attributes are removed and links or images pointing
/// at `javascript:` URLs lose the offending attribute. Things like
/// `<b>`, `<a href="https://...">` and `<img alt="..." src="...">`
/// survive.
pub fn sanitize(raw: &str) -> SanitizedHtml {
    SanitizedHtml(ammonia::clean(raw))
}
