use serde::{Deserialize, Serialize};

use super::Id;

/// Wire shape of an entity with its identifier attached.
///
/// The backend sends entities flat, with `id` alongside the entity's own
/// fields. `Input` is only used at the boundary; the stores keep the id as
/// a map key and the entity as the value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Input<T> {
    pub id: Id,
    #[serde(flatten)]
    pub entity: T,
}

impl<T> Input<T> {
    pub fn new(id: Id, entity: T) -> Self {
        Self { id, entity }
    }

    /// Split into the `(id, entity)` pair the stores are keyed by.
    pub fn into_pair(self) -> (Id, T) {
        (self.id, self.entity)
    }
}

impl<T> From<Input<T>> for (Id, T) {
    fn from(input: Input<T>) -> Self {
        input.into_pair()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{Channel, Item};
    use pretty_assertions::assert_eq;

    #[test]
    fn channel_input_reads_flat_wire_record() {
        let raw = r#"{"id":7,"url":"https://a","title":"A","date":"2024-01-01","subscribed":false}"#;
        let input: Input<Channel> = serde_json::from_str(raw).unwrap();

        let (id, channel) = input.into_pair();
        assert_eq!(id, 7);
        assert_eq!(channel.url, "https://a");
        assert!(!channel.subscribed);
    }

    #[test]
    fn channel_subscribed_defaults_to_true() {
        let raw = r#"{"id":1,"url":"https://a","title":"A","date":"2024-01-01"}"#;
        let input: Input<Channel> = serde_json::from_str(raw).unwrap();
        assert!(input.entity.subscribed);
    }

    #[test]
    fn item_without_url_is_accepted() {
        let raw = r#"{"id":3,"feed_id":1,"read":true,"date":"2024-01-02","content":"<p>x</p>","title":"T"}"#;
        let input: Input<Item> = serde_json::from_str(raw).unwrap();

        assert_eq!(input.id, 3);
        assert_eq!(input.entity.feed_id, 1);
        assert_eq!(input.entity.url, None);
        assert!(input.entity.read);
    }

    #[test]
    fn item_without_read_or_content_is_rejected() {
        let no_read = r#"{"id":3,"feed_id":1,"date":"2024-01-02","content":"","title":"T"}"#;
        let no_content = r#"{"id":3,"feed_id":1,"read":false,"date":"2024-01-02","title":"T"}"#;
        assert!(serde_json::from_str::<Input<Item>>(no_read).is_err());
        assert!(serde_json::from_str::<Input<Item>>(no_content).is_err());
    }

    #[test]
    fn missing_required_field_is_rejected() {
        let raw = r#"{"id":3,"read":true,"date":"2024-01-02","title":"T"}"#;
        assert!(serde_json::from_str::<Input<Item>>(raw).is_err());
    }
}
