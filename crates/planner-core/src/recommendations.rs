//! Fixed channel and region suggestions keyed on industry and goals.

use crate::models::{Channel, Industry, KpiGoal};
use crate::regions::GermanRegion;

/// Channels suggested for a campaign.
///
/// Brand awareness wins over sales, which wins over lead generation. Without
/// any of those goals the first five standard channels are returned.
pub fn recommended_channels(industry: Option<Industry>, goals: &[KpiGoal]) -> Vec<Channel> {
    use Channel::*;

    if goals.contains(&KpiGoal::BrandAwareness) {
        return match industry {
            Some(Industry::Automotive) => vec![TraditionalTv, DigitalTv, Outdoor, Dooh],
            Some(Industry::Fashion) => vec![SocialMedia, DigitalInteractive, Print],
            Some(Industry::Technology) => vec![DigitalBanners, DigitalInteractive, Streaming],
            _ => vec![TraditionalTv, SocialMedia, Outdoor],
        };
    }
    if goals.contains(&KpiGoal::Sales) {
        return match industry {
            Some(Industry::Automotive) => vec![TraditionalTv, DigitalTv, Print],
            Some(Industry::Fashion) => vec![SocialMedia, DigitalBanners, EmailMarketing],
            _ => vec![DigitalBanners, EmailMarketing, SocialMedia],
        };
    }
    if goals.contains(&KpiGoal::LeadGeneration) {
        return vec![DigitalBanners, EmailMarketing, SocialMedia, DigitalInteractive];
    }
    Channel::STANDARD[..5].to_vec()
}

/// States suggested for a campaign.
pub fn recommended_regions(industry: Option<Industry>, goals: &[KpiGoal]) -> Vec<GermanRegion> {
    use GermanRegion::*;

    if goals.contains(&KpiGoal::BrandAwareness) || goals.contains(&KpiGoal::SocialMediaEngagement) {
        return vec![Berlin, Hamburg, NorthRhineWestphalia, Bavaria];
    }
    if goals.contains(&KpiGoal::Sales) {
        return match industry {
            Some(Industry::Automotive) => vec![BadenWurttemberg, Bavaria, NorthRhineWestphalia],
            Some(Industry::Fashion) => vec![Berlin, Hamburg, NorthRhineWestphalia],
            Some(Industry::Technology) => vec![Berlin, Bavaria, Hesse],
            _ => vec![NorthRhineWestphalia, Bavaria, Berlin],
        };
    }
    vec![Berlin, Hamburg, NorthRhineWestphalia, Bavaria, Hesse]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brand_awareness_channels_by_industry() {
        let goals = [KpiGoal::Sales, KpiGoal::BrandAwareness];
        assert_eq!(
            recommended_channels(Some(Industry::Automotive), &goals),
            vec![Channel::TraditionalTv, Channel::DigitalTv, Channel::Outdoor, Channel::Dooh]
        );
        assert_eq!(
            recommended_channels(Some(Industry::Travel), &goals),
            vec![Channel::TraditionalTv, Channel::SocialMedia, Channel::Outdoor]
        );
    }

    #[test]
    fn test_sales_channels() {
        assert_eq!(
            recommended_channels(Some(Industry::Fashion), &[KpiGoal::Sales]),
            vec![Channel::SocialMedia, Channel::DigitalBanners, Channel::EmailMarketing]
        );
        assert_eq!(
            recommended_channels(None, &[KpiGoal::Sales]),
            vec![Channel::DigitalBanners, Channel::EmailMarketing, Channel::SocialMedia]
        );
    }

    #[test]
    fn test_lead_generation_and_fallback_channels() {
        assert_eq!(
            recommended_channels(Some(Industry::Finance), &[KpiGoal::LeadGeneration]).len(),
            4
        );
        let fallback = recommended_channels(Some(Industry::Finance), &[KpiGoal::AppDownloads]);
        assert_eq!(fallback, Channel::STANDARD[..5].to_vec());
    }

    #[test]
    fn test_recommended_regions() {
        assert_eq!(
            recommended_regions(None, &[KpiGoal::SocialMediaEngagement]),
            vec![
                GermanRegion::Berlin,
                GermanRegion::Hamburg,
                GermanRegion::NorthRhineWestphalia,
                GermanRegion::Bavaria
            ]
        );
        assert_eq!(
            recommended_regions(Some(Industry::Technology), &[KpiGoal::Sales]),
            vec![GermanRegion::Berlin, GermanRegion::Bavaria, GermanRegion::Hesse]
        );
        assert_eq!(recommended_regions(None, &[]).len(), 5);
    }
}
