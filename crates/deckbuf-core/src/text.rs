//! Text conveniences for `Builder<char>`.

use std::fmt;

use crate::builder::Builder;

impl Builder<char> {
    /// Append the characters of `s`.
    pub fn push_str(&mut self, s: &str) {
        let count = s.chars().count();
        self.ensure_append(count);
        let start = self.tail;
        for (slot, c) in self.storage[start..start + count].iter_mut().zip(s.chars()) {
            *slot = c;
        }
        self.tail = start + count;
    }

    /// Prepend the characters of `s`, keeping their order.
    pub fn prepend_str(&mut self, s: &str) {
        let count = s.chars().count();
        self.ensure_prepend(count);
        let start = self.head - count;
        for (slot, c) in self.storage[start..self.head].iter_mut().zip(s.chars()) {
            *slot = c;
        }
        self.head = start;
    }
}

impl fmt::Display for Builder<char> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Write as _;
        for &c in self.iter() {
            f.write_char(c)?;
        }
        Ok(())
    }
}

impl fmt::Write for Builder<char> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push_str(s);
        Ok(())
    }

    fn write_char(&mut self, c: char) -> fmt::Result {
        self.push_back(c);
        Ok(())
    }
}

impl From<&str> for Builder<char> {
    fn from(s: &str) -> Self {
        let count = s.chars().count();
        let mut builder = Self::with_capacity(count);
        builder.center_for(count);
        builder.push_str(s);
        builder
    }
}

impl From<&Builder<char>> for String {
    fn from(builder: &Builder<char>) -> Self {
        builder.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use std::fmt::Write;
    use std::sync::Arc;

    use deckbuf_pool::{ArrayPool, SharedPool};

    use super::*;

    #[test]
    fn display_renders_chars() {
        let b = Builder::from("héllo");
        assert_eq!(b.len(), 5);
        assert_eq!(b.to_string(), "héllo");
    }

    #[test]
    fn from_str_presizes_like_from_slice() {
        let s = "0123456789abcdef";
        let seq: Vec<char> = s.chars().collect();
        let b = Builder::from(s);
        let seeded = Builder::from_slice(&seq, 1);
        assert_eq!(b.capacity(), 16);
        assert_eq!(b.capacity(), seeded.capacity());
        assert_eq!(b.front_capacity(), seeded.front_capacity());
    }

    #[test]
    fn from_str_sizes_by_chars_not_bytes() {
        let b = Builder::from("é".repeat(100).as_str());
        assert_eq!(b.len(), 100);
        assert_eq!(b.capacity(), 128);
    }

    #[test]
    fn push_str_grows_at_most_once() {
        let pool: SharedPool<char> = Arc::new(ArrayPool::new());
        let mut b = Builder::with_pool(Arc::clone(&pool));
        b.push_str(&"x".repeat(40));
        assert_eq!(b.len(), 40);
        assert_eq!(pool.stats().rents, 2);
    }

    #[test]
    fn prepend_str_keeps_order() {
        let mut b = Builder::from("world");
        b.prepend_str("hello, ");
        b.push_str("!");
        assert_eq!(b.to_string(), "hello, world!");
        assert_eq!(String::from(&b), "hello, world!");
    }

    #[test]
    fn write_macro_appends() {
        let mut b = Builder::from("x = ");
        write!(b, "{}", 42).unwrap();
        assert_eq!(b.to_string(), "x = 42");
    }

    #[test]
    fn empty_str_is_empty_builder() {
        let mut b = Builder::from("");
        b.prepend_str("");
        assert!(b.is_empty());
        assert_eq!(b.to_string(), "");
    }
}
