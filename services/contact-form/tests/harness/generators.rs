// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: Apache-2.0

//! Test data generators for abuse simulation.

use contact_form::Submission;

/// A well-formed submission from a human sender.
pub fn legitimate(i: usize) -> Submission {
    Submission {
        website_url: Some(String::new()),
        name: format!("Visitor {}", i),
        email: format!("visitor{}@example.org", i),
        subject: format!("Question {}", i),
        message: format!("Hello, I would like a quote for project {}.", i),
    }
}

/// Values a form-filling bot typically writes into the hidden field.
pub fn honeypot_values() -> Vec<&'static str> {
    vec![
        "http://spam.example.com",
        "www.spam.example.com",
        "1",
        "0",
        " ",
        "\t",
        "Visitor",
    ]
}

/// Mixed-case and embedded variations of each denylisted phrase.
pub fn keyword_variants(keywords: &[String]) -> Vec<String> {
    keywords
        .iter()
        .flat_map(|k| {
            vec![
                k.clone(),
                k.to_uppercase(),
                title_case(k),
                format!("Dear owner, {} is what we offer!", k),
                format!("P.S. {}", k.to_uppercase()),
            ]
        })
        .collect()
}

/// Messages carrying `count` copies of a link marker.
pub fn link_flood(marker: &str, count: usize) -> String {
    (0..count)
        .map(|i| format!("{}{}.example.net/{} ", marker, i, i))
        .collect()
}

/// Legitimate messages that mention links without crossing the threshold,
/// or that only resemble denylisted phrases.
pub fn near_misses() -> Vec<String> {
    vec![
        "My site is https://www.example.org, see https://www.example.org/about".to_string(),
        link_flood("http://www.", 3),
        "We design web pages in-house.".to_string(),
        "Could you rank my application for the role?".to_string(),
        "HTTP HTTP HTTP HTTP HTTP".to_string(),
    ]
}

/// Email inputs that sanitize into something still invalid.
pub fn malformed_emails() -> Vec<&'static str> {
    vec![
        "",
        "plainaddress",
        "@example.org",
        "visitor@",
        "visitor@localhost",
        "visitor@@example.org",
        "visitor@[127.0.0.1]",
        "\"visitor\"",
        "visitor example.org",
    ]
}

fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
