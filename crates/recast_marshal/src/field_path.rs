//! Tracks the field path of the running traversal.
//!
//! Only recorded with the `debug` feature in debug builds, otherwise every
//! function here is a no-op.

use core::fmt::Display;

#[cfg(all(debug_assertions, feature = "debug"))]
std::thread_local! {
    static FIELD_PATH: core::cell::RefCell<Vec<Segment>> =
        const { core::cell::RefCell::new(Vec::new()) };
}

#[cfg(all(debug_assertions, feature = "debug"))]
enum Segment {
    Field(String),
    Index(usize),
}

/// Leaves the entered segment when dropped.
#[must_use = "the segment is left as soon as the guard is dropped"]
pub(crate) struct PathGuard {
    _private: (),
}

impl Drop for PathGuard {
    #[inline]
    fn drop(&mut self) {
        #[cfg(all(debug_assertions, feature = "debug"))]
        FIELD_PATH.with_borrow_mut(|path| {
            path.pop();
        });
    }
}

/// Enters the field `name`.
#[inline]
pub(crate) fn enter(name: &str) -> PathGuard {
    #[cfg(all(debug_assertions, feature = "debug"))]
    FIELD_PATH.with_borrow_mut(|path| path.push(Segment::Field(name.to_owned())));
    #[cfg(not(all(debug_assertions, feature = "debug")))]
    let _ = name;
    PathGuard { _private: () }
}

/// Enters the element at `index` of the current array.
#[inline]
pub(crate) fn enter_index(index: usize) -> PathGuard {
    #[cfg(all(debug_assertions, feature = "debug"))]
    FIELD_PATH.with_borrow_mut(|path| path.push(Segment::Index(index)));
    #[cfg(not(all(debug_assertions, feature = "debug")))]
    let _ = index;
    PathGuard { _private: () }
}

/// Appends the current path to `msg`.
pub(crate) fn decorate(msg: impl Display) -> String {
    #[cfg(all(debug_assertions, feature = "debug"))]
    {
        FIELD_PATH.with_borrow(|path| {
            if path.is_empty() {
                return msg.to_string();
            }
            let mut at = String::new();
            for segment in path {
                match segment {
                    Segment::Field(name) => {
                        if !at.is_empty() {
                            at.push('.');
                        }
                        at.push_str(name);
                    }
                    Segment::Index(index) => {
                        use core::fmt::Write;
                        let _ = write!(at, "[{index}]");
                    }
                }
            }
            format!("{msg} (at `{at}`)")
        })
    }
    #[cfg(not(all(debug_assertions, feature = "debug")))]
    {
        msg.to_string()
    }
}

#[cfg(all(test, debug_assertions, feature = "debug"))]
mod tests {
    use super::{decorate, enter, enter_index};

    #[test]
    fn path_follows_the_guards() {
        assert_eq!(decorate("bad"), "bad");
        {
            let _orders = enter("orders");
            let _second = enter_index(2);
            let _price = enter("price");
            assert_eq!(decorate("bad"), "bad (at `orders[2].price`)");
        }
        assert_eq!(decorate("bad"), "bad");
    }
}
