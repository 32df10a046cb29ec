//! Per-device batch delivery results.

use simple_sns_aws::PublishReceipt;
use std::collections::BTreeMap;

use crate::{DeviceArn, PushError};

/// Outcome of one publish within a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// SNS accepted the message.
    Delivered(PublishReceipt),
    /// The publish failed.
    Failed(PushError),
}

impl DeliveryOutcome {
    /// Whether SNS accepted the message.
    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered(_))
    }

    /// The failure, if any.
    pub fn error(&self) -> Option<&PushError> {
        match self {
            Self::Failed(err) => Some(err),
            Self::Delivered(_) => None,
        }
    }

    /// Convert into a `Result`.
    pub fn into_result(self) -> Result<PublishReceipt, PushError> {
        match self {
            Self::Delivered(receipt) => Ok(receipt),
            Self::Failed(err) => Err(err),
        }
    }
}

impl From<Result<PublishReceipt, PushError>> for DeliveryOutcome {
    fn from(result: Result<PublishReceipt, PushError>) -> Self {
        match result {
            Ok(receipt) => Self::Delivered(receipt),
            Err(err) => Self::Failed(err),
        }
    }
}

/// Outcomes of a batch send, keyed by device arn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    outcomes: BTreeMap<DeviceArn, DeliveryOutcome>,
}

impl DeliveryReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome for a device.
    pub fn insert(&mut self, device_arn: impl Into<DeviceArn>, outcome: DeliveryOutcome) {
        self.outcomes.insert(device_arn.into(), outcome);
    }

    /// Outcome for one device.
    pub fn get(&self, device_arn: &str) -> Option<&DeliveryOutcome> {
        self.outcomes.get(device_arn)
    }

    /// Number of devices in the report.
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Whether the report is empty.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Iterate over all outcomes.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DeliveryOutcome)> {
        self.outcomes.iter().map(|(arn, o)| (arn.as_str(), o))
    }

    /// Devices that received the message.
    pub fn succeeded(&self) -> impl Iterator<Item = (&str, &PublishReceipt)> {
        self.outcomes.iter().filter_map(|(arn, o)| match o {
            DeliveryOutcome::Delivered(receipt) => Some((arn.as_str(), receipt)),
            DeliveryOutcome::Failed(_) => None,
        })
    }

    /// Devices whose publish failed.
    pub fn failed(&self) -> impl Iterator<Item = (&str, &PushError)> {
        self.outcomes.iter().filter_map(|(arn, o)| match o {
            DeliveryOutcome::Failed(err) => Some((arn.as_str(), err)),
            DeliveryOutcome::Delivered(_) => None,
        })
    }

    /// Whether every device received the message.
    pub fn all_delivered(&self) -> bool {
        self.outcomes.values().all(DeliveryOutcome::is_delivered)
    }

    /// Devices whose failure means the endpoint should be removed.
    pub fn stale_devices(&self) -> Vec<&str> {
        self.failed()
            .filter(|(_, err)| err.should_remove_device())
            .map(|(arn, _)| arn)
            .collect()
    }
}

impl IntoIterator for DeliveryReport {
    type Item = (DeviceArn, DeliveryOutcome);
    type IntoIter = std::collections::btree_map::IntoIter<DeviceArn, DeliveryOutcome>;

    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.into_iter()
    }
}

impl FromIterator<(DeviceArn, DeliveryOutcome)> for DeliveryReport {
    fn from_iter<T: IntoIterator<Item = (DeviceArn, DeliveryOutcome)>>(iter: T) -> Self {
        Self {
            outcomes: iter.into_iter().collect(),
        }
    }
}
