use crate::error::{PlannerError, Result};
use crate::models::Channel;
use crate::notifications::Notice;

// ── Base cost table ───────────────────────────────────────────────────────────

/// Monthly base cost (thousands of EUR) assumed for channels without a
/// dedicated entry.
pub const DEFAULT_CHANNEL_COST: f64 = 50.0;

/// Monthly base cost of a channel in thousands of EUR.
///
/// These are planning approximations, used only to seed a budget proposal.
pub fn channel_cost(channel: &Channel) -> f64 {
    match channel {
        Channel::TraditionalTv => 250.0,
        Channel::DigitalTv => 150.0,
        Channel::Streaming => 120.0,
        Channel::Print => 100.0,
        Channel::SocialMedia => 80.0,
        Channel::DigitalBanners => 60.0,
        Channel::DigitalInteractive => 90.0,
        Channel::Radio => 70.0,
        Channel::Podcasts => 40.0,
        Channel::Outdoor => 110.0,
        Channel::Dooh => 130.0,
        Channel::EmailMarketing => 30.0,
        Channel::Custom(_) => DEFAULT_CHANNEL_COST,
    }
}

// ── ChannelCatalog ────────────────────────────────────────────────────────────

/// The ordered list of channels a planner can choose from.
///
/// Starts with the standard channels; names added or renamed are trimmed and
/// lower-cased, and must be non-empty and unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelCatalog {
    channels: Vec<Channel>,
}

impl Default for ChannelCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl ChannelCatalog {
    /// Catalog holding the twelve standard channels.
    pub fn standard() -> Self {
        Self {
            channels: Channel::STANDARD.to_vec(),
        }
    }

    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    pub fn contains(&self, channel: &Channel) -> bool {
        self.channels.contains(channel)
    }

    /// Resolve a user-typed name to a channel in the catalog.
    pub fn resolve(&self, name: &str) -> Result<Channel> {
        let channel = Channel::from(name);
        if self.contains(&channel) {
            Ok(channel)
        } else {
            Err(PlannerError::UnknownValue {
                kind: "channel",
                value: name.to_string(),
            })
        }
    }

    fn normalise(name: &str) -> Result<Channel> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(PlannerError::EmptyChannelName);
        }
        Ok(Channel::from(trimmed))
    }

    /// Append a new channel.
    pub fn add(&mut self, name: &str) -> Result<Notice> {
        let channel = Self::normalise(name)?;
        if self.contains(&channel) {
            return Err(PlannerError::DuplicateChannel(channel.as_str().to_string()));
        }
        tracing::debug!(channel = %channel, "channel added to catalog");
        self.channels.push(channel);
        Ok(Notice::success("Channel added successfully"))
    }

    /// Replace the channel at `index` with `name`.
    ///
    /// Renaming a channel to its current name is accepted.
    pub fn rename(&mut self, index: usize, name: &str) -> Result<Notice> {
        if index >= self.channels.len() {
            return Err(PlannerError::ChannelIndex(index));
        }
        let channel = Self::normalise(name)?;
        if channel != self.channels[index] && self.contains(&channel) {
            return Err(PlannerError::DuplicateChannel(channel.as_str().to_string()));
        }
        self.channels[index] = channel;
        Ok(Notice::success("Channel updated successfully"))
    }

    /// Remove and return the channel at `index`.
    pub fn remove(&mut self, index: usize) -> Result<(Channel, Notice)> {
        if index >= self.channels.len() {
            return Err(PlannerError::ChannelIndex(index));
        }
        let removed = self.channels.remove(index);
        Ok((removed, Notice::success("Channel deleted successfully")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_cost_table() {
        assert_eq!(channel_cost(&Channel::TraditionalTv), 250.0);
        assert_eq!(channel_cost(&Channel::EmailMarketing), 30.0);
        assert_eq!(channel_cost(&Channel::Dooh), 130.0);
        assert_eq!(
            channel_cost(&Channel::Custom("cinema".to_string())),
            DEFAULT_CHANNEL_COST
        );
    }

    #[test]
    fn test_standard_catalog() {
        let catalog = ChannelCatalog::standard();
        assert_eq!(catalog.len(), 12);
        assert_eq!(catalog.channels()[0], Channel::TraditionalTv);
        assert!(!catalog.is_empty());
    }

    #[test]
    fn test_add_channel_normalises_name() {
        let mut catalog = ChannelCatalog::standard();
        catalog.add("  Cinema ").unwrap();
        assert_eq!(catalog.len(), 13);
        assert_eq!(catalog.channels()[12], Channel::Custom("cinema".to_string()));
    }

    #[test]
    fn test_add_rejects_empty_and_duplicate() {
        let mut catalog = ChannelCatalog::standard();
        assert!(matches!(catalog.add("   "), Err(PlannerError::EmptyChannelName)));
        assert!(matches!(
            catalog.add("Radio"),
            Err(PlannerError::DuplicateChannel(_))
        ));
        assert_eq!(catalog.len(), 12);
    }

    #[test]
    fn test_rename_channel() {
        let mut catalog = ChannelCatalog::standard();
        catalog.rename(7, "Web Radio").unwrap();
        assert_eq!(catalog.channels()[7], Channel::Custom("web radio".to_string()));
        // Same name is fine.
        catalog.rename(0, "traditional tv").unwrap();
        // Another existing name is not.
        assert!(matches!(
            catalog.rename(0, "print"),
            Err(PlannerError::DuplicateChannel(_))
        ));
        assert!(matches!(
            catalog.rename(99, "x"),
            Err(PlannerError::ChannelIndex(99))
        ));
    }

    #[test]
    fn test_remove_channel() {
        let mut catalog = ChannelCatalog::standard();
        let (removed, notice) = catalog.remove(0).unwrap();
        assert_eq!(removed, Channel::TraditionalTv);
        assert_eq!(notice.title, "Channel deleted successfully");
        assert_eq!(catalog.len(), 11);
        assert!(catalog.remove(11).is_err());
    }

    #[test]
    fn test_resolve() {
        let mut catalog = ChannelCatalog::standard();
        assert_eq!(catalog.resolve("Social Media").unwrap(), Channel::SocialMedia);
        assert!(catalog.resolve("cinema").is_err());
        catalog.add("cinema").unwrap();
        assert_eq!(
            catalog.resolve("CINEMA").unwrap(),
            Channel::Custom("cinema".to_string())
        );
    }
}
