// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Contact form submission and its normalization.

use serde::Deserialize;

/// Raw form fields for one contact request.
///
/// Fields missing from the form body deserialize as empty strings so that
/// they fail validation rather than extraction.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Submission {
    /// Hidden honeypot field, expected to stay empty
    #[serde(default)]
    pub website_url: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

/// A submission after trimming, markup stripping and email sanitizing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDetails {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl Submission {
    /// True when the honeypot carries any value, whitespace included.
    pub fn honeypot_filled(&self) -> bool {
        self.website_url.as_deref().is_some_and(|v| !v.is_empty())
    }

    /// Produce the normalized contact details. The message body is only
    /// trimmed; it goes out as plain text.
    pub fn normalize(&self) -> ContactDetails {
        ContactDetails {
            name: strip_tags(self.name.trim()),
            email: sanitize_email(self.email.trim()),
            subject: strip_tags(self.subject.trim()),
            message: self.message.trim().to_string(),
        }
    }
}

/// Remove markup tags from `input`.
///
/// A `<` immediately followed by whitespace (or at end of input) is kept as
/// text. An unterminated tag consumes the rest of the input.
pub fn strip_tags(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_tag = false;

    while let Some(c) = chars.next() {
        if in_tag {
            if c == '>' {
                in_tag = false;
            }
            continue;
        }
        match c {
            '<' => match chars.peek() {
                Some(next) if !next.is_whitespace() => in_tag = true,
                _ => out.push(c),
            },
            '\0' => {}
            _ => out.push(c),
        }
    }

    out
}

/// Keep only characters that may appear in an email address.
pub fn sanitize_email(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || "!#$%&'*+-=?^_`{|}~@.[]".contains(*c))
        .collect()
}
