use serde::{Deserialize, Serialize};
use std::fmt;

/// Source coordinates within a partitioned log.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TopicPartition {
    pub topic: String,
    pub partition: i32,
}

impl TopicPartition {
    pub fn new(topic: impl Into<String>, partition: i32) -> Self {
        Self {
            topic: topic.into(),
            partition,
        }
    }
}

impl fmt::Display for TopicPartition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.topic, self.partition)
    }
}

/// Identity of one subscription consuming one topic.
///
/// Scopes are pure identity: value equality, immutable after construction,
/// no behavior beyond display formatting for logs and metric labels.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionScope {
    pub subscription_id: String,
    pub topic: String,
}

impl SubscriptionScope {
    pub fn new(subscription_id: impl Into<String>, topic: impl Into<String>) -> Self {
        Self {
            subscription_id: subscription_id.into(),
            topic: topic.into(),
        }
    }
}

impl fmt::Display for SubscriptionScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.subscription_id, self.topic)
    }
}

/// Identity of one owned partition within a subscription.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PartitionScope {
    pub subscription: SubscriptionScope,
    pub partition: i32,
}

impl PartitionScope {
    pub fn new(subscription: SubscriptionScope, partition: i32) -> Self {
        Self {
            subscription,
            partition,
        }
    }

    pub fn topic_partition(&self) -> TopicPartition {
        TopicPartition::new(self.subscription.topic.clone(), self.partition)
    }
}

impl fmt::Display for PartitionScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.subscription, self.partition)
    }
}

/// Identity of one worker slot within a partition: the scope owned by exactly
/// one processor unit for its whole lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkerScope {
    pub partition: PartitionScope,
    pub worker_index: u32,
}

impl WorkerScope {
    pub fn new(partition: PartitionScope, worker_index: u32) -> Self {
        Self {
            partition,
            worker_index,
        }
    }

    pub fn subscription_id(&self) -> &str {
        &self.partition.subscription.subscription_id
    }

    pub fn topic(&self) -> &str {
        &self.partition.subscription.topic
    }
}

impl fmt::Display for WorkerScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.partition, self.worker_index)
    }
}
