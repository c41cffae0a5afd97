//! Log-safe rendering of contact details
//!
//! Booking logs carry customer emails and phone numbers; these wrappers keep
//! enough of each value to correlate entries without writing it out in full.

use std::fmt;

/// Email shown as its first character and domain, e.g. `a***@example.com`
#[derive(Clone)]
pub struct MaskedEmail<'a> {
    inner: &'a str,
}

impl<'a> MaskedEmail<'a> {
    pub fn new(email: &'a str) -> Self {
        Self { inner: email }
    }
}

impl<'a> fmt::Display for MaskedEmail<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.split_once('@') {
            Some((local, domain)) if !local.is_empty() => {
                let first = local.chars().next().unwrap_or('*');
                write!(f, "{}***@{}", first, domain)
            }
            _ => write!(f, "***"),
        }
    }
}

/// Phone number shown as its last two digits, e.g. `***45`
#[derive(Clone)]
pub struct MaskedPhone<'a> {
    inner: &'a str,
}

impl<'a> MaskedPhone<'a> {
    pub fn new(phone: &'a str) -> Self {
        Self { inner: phone }
    }
}

impl<'a> fmt::Display for MaskedPhone<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits: Vec<char> = self.inner.chars().filter(char::is_ascii_digit).collect();
        if digits.len() < 4 {
            return write!(f, "***");
        }
        let tail: String = digits[digits.len() - 2..].iter().collect();
        write!(f, "***{}", tail)
    }
}

impl<'a> fmt::Debug for MaskedEmail<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl<'a> fmt::Debug for MaskedPhone<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Mask a secret for display, keeping its first two characters
pub fn mask_secret(secret: &str) -> String {
    if secret.chars().count() <= 4 {
        return "***".to_string();
    }
    let prefix: String = secret.chars().take(2).collect();
    format!("{}***", prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masked_email() {
        assert_eq!(MaskedEmail::new("anna@example.com").to_string(), "a***@example.com");
        assert_eq!(MaskedEmail::new("a@x.com").to_string(), "a***@x.com");
        assert_eq!(MaskedEmail::new("not-an-email").to_string(), "***");
        assert_eq!(MaskedEmail::new("@x.com").to_string(), "***");
    }

    #[test]
    fn test_masked_phone() {
        assert_eq!(MaskedPhone::new("+7 (900) 123-45-67").to_string(), "***67");
        assert_eq!(MaskedPhone::new("12").to_string(), "***");
    }

    #[test]
    fn test_debug_output_is_masked() {
        assert_eq!(format!("{:?}", MaskedPhone::new("+7 (900) 123-45-67")), "***67");
        assert_eq!(format!("{:?}", MaskedEmail::new("anna@example.com")), "a***@example.com");
    }

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret("abc"), "***");
        assert_eq!(mask_secret("demo-password"), "de***");
    }
}
