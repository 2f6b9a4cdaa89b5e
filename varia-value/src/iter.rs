//! Member iteration.
//!
//! [`Members`] and [`MembersMut`] walk a container value's members in key
//! order, from either end. Both are thin wrappers over the same map cursor;
//! on a scalar value they are simply empty, so callers can iterate without
//! checking the kind first.

use std::collections::btree_map;

use crate::key::Key;
use crate::value::{MemberMap, Value};

/// Iterator over a value's members, yielded as `(&Key, &Value)` pairs in
/// key order. Created by [`Value::members`].
pub struct Members<'a> {
    inner: Option<btree_map::Iter<'a, Key, Value>>,
}

impl<'a> Members<'a> {
    pub(crate) fn new(members: Option<&'a MemberMap>) -> Self {
        Members {
            inner: members.map(|m| m.iter()),
        }
    }
}

impl<'a> Iterator for Members<'a> {
    type Item = (&'a Key, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.as_mut()?.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.inner {
            Some(iter) => iter.size_hint(),
            None => (0, Some(0)),
        }
    }
}

impl DoubleEndedIterator for Members<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.as_mut()?.next_back()
    }
}

impl ExactSizeIterator for Members<'_> {}

/// Like [`Members`], with mutable access to the values. Keys stay shared:
/// rewriting a key would reorder the map under the cursor. Created by
/// [`Value::members_mut`].
pub struct MembersMut<'a> {
    inner: Option<btree_map::IterMut<'a, Key, Value>>,
}

impl<'a> MembersMut<'a> {
    pub(crate) fn new(members: Option<&'a mut MemberMap>) -> Self {
        MembersMut {
            inner: members.map(|m| m.iter_mut()),
        }
    }
}

impl<'a> Iterator for MembersMut<'a> {
    type Item = (&'a Key, &'a mut Value);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.as_mut()?.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.inner {
            Some(iter) => iter.size_hint(),
            None => (0, Some(0)),
        }
    }
}

impl DoubleEndedIterator for MembersMut<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.as_mut()?.next_back()
    }
}

impl ExactSizeIterator for MembersMut<'_> {}
