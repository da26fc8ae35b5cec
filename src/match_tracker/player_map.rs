use crate::core::user::User;

/// Per-player accumulator that iterates in first-seen order.
///
/// Results are rendered straight from these maps, so iteration order must not
/// depend on hashing.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerMap<V> {
    entries: Vec<(User, V)>,
}

impl<V> Default for PlayerMap<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<V> PlayerMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, player: &User) -> Option<&V> {
        self.entries
            .iter()
            .find(|(user, _)| user == player)
            .map(|(_, value)| value)
    }

    pub fn insert(&mut self, player: &User, value: V) {
        match self.entries.iter_mut().find(|(user, _)| user == player) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((player.clone(), value)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&User, &V)> {
        self.entries.iter().map(|(user, value)| (user, value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V: Default> PlayerMap<V> {
    pub fn entry(&mut self, player: &User) -> &mut V {
        let index = match self.entries.iter().position(|(user, _)| user == player) {
            Some(index) => index,
            None => {
                self.entries.push((player.clone(), V::default()));
                self.entries.len() - 1
            }
        };
        &mut self.entries[index].1
    }
}

impl<V> IntoIterator for PlayerMap<V> {
    type Item = (User, V);
    type IntoIter = std::vec::IntoIter<(User, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_first_seen_order_and_matches_on_id() {
        let mut map: PlayerMap<u32> = PlayerMap::new();
        *map.entry(&User::new("2", "two", None)) += 1;
        *map.entry(&User::new("1", "one", None)) += 1;
        *map.entry(&User::new("2", "renamed", None)) += 1;

        let ids: Vec<_> = map.iter().map(|(user, _)| user.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1"]);
        assert_eq!(map.get(&User::new("2", "two", None)), Some(&2));
    }
}
