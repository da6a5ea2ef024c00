use std::ops::Deref;

/// A small set that remembers insertion order.
///
/// Removal preserves the order of the remaining elements.
#[derive(Debug, Clone)]
pub struct VecSet<T> {
    vec: Vec<T>,
}

impl<T> Default for VecSet<T> {
    fn default() -> Self {
        Self { vec: vec![] }
    }
}

impl<T> Deref for VecSet<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.vec
    }
}

impl<T> VecSet<T> {
    pub fn clear(&mut self) {
        self.vec.clear();
    }

    pub fn take(&mut self) -> Vec<T> {
        std::mem::take(&mut self.vec)
    }
}

impl<T: PartialEq> VecSet<T> {
    pub fn insert(&mut self, val: T) -> bool {
        if self.vec.contains(&val) {
            return false;
        }
        self.vec.push(val);
        true
    }

    pub fn extend(&mut self, vals: impl IntoIterator<Item = T>) -> bool {
        let mut res = false;
        for val in vals {
            res |= self.insert(val);
        }
        res
    }

    pub fn remove(&mut self, val: &T) -> bool {
        match self.vec.iter().position(|v| v == val) {
            Some(idx) => {
                self.vec.remove(idx);
                true
            }
            None => false,
        }
    }
}
