use indexmap::IndexMap;

pub trait MergeRight {
    fn merge_right(self, other: Self) -> Self;
}

impl<K, V> MergeRight for IndexMap<K, V>
where
    K: Eq + std::hash::Hash,
    V: MergeRight,
{
    fn merge_right(mut self, other: Self) -> Self {
        for (other_name, mut other_value) in other {
            if let Some(self_value) = self.shift_remove(&other_name) {
                other_value = self_value.merge_right(other_value);
            }

            self.insert(other_name, other_value);
        }
        self
    }
}
