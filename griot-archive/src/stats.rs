//! Contributor statistics and badge predicates
//!
//! Pure, read-only aggregation over a contributor's approved feed. Nothing
//! is stored; counts and badges are recomputed on every profile read. The
//! caller passes the approved-only content list so pending/rejected/removed
//! items never leak into public counts.

use chrono::{DateTime, Duration, TimeZone, Utc};
use griot_common::content::{ContentKind, UnifiedContent};
use griot_common::db::models::Contributor;
use once_cell::sync::Lazy;
use serde::Serialize;

/// Instant the platform launched; contributors who registered within one
/// year of it earn the founding-contributor badge
pub static PLATFORM_LAUNCH: Lazy<DateTime<Utc>> = Lazy::new(|| {
    Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0)
        .single()
        .expect("platform launch instant is a valid timestamp")
});

/// Per-kind and total counts plus earned badges
#[derive(Debug, Clone, Serialize)]
pub struct ContributorStats {
    pub stories: usize,
    pub proverbs: usize,
    pub art: usize,
    pub music: usize,
    pub total: usize,
    pub badges: Badges,
}

/// Badge predicates evaluated against the approved feed
#[derive(Debug, Clone, Serialize)]
pub struct Badges {
    /// At least 3 stories
    pub storyteller: bool,
    /// At least 3 proverbs
    pub wisdom_keeper: bool,
    /// At least 10 items in total
    pub custodian: bool,
    /// At least one item of every kind
    pub four_traditions: bool,
    /// Account created within one year of platform launch
    pub founding_contributor: bool,
}

/// Compute statistics for one contributor over their approved content
pub fn compute(contributor: &Contributor, content: &[UnifiedContent]) -> ContributorStats {
    let count_kind = |kind: ContentKind| {
        content
            .iter()
            .filter(|item| item.content_type == kind)
            .count()
    };

    let stories = count_kind(ContentKind::Stories);
    let proverbs = count_kind(ContentKind::Proverbs);
    let art = count_kind(ContentKind::Art);
    let music = count_kind(ContentKind::Music);
    let total = content.len();

    let badges = Badges {
        storyteller: stories >= 3,
        wisdom_keeper: proverbs >= 3,
        custodian: total >= 10,
        four_traditions: stories >= 1 && proverbs >= 1 && art >= 1 && music >= 1,
        founding_contributor: contributor.created_at < *PLATFORM_LAUNCH + Duration::days(365),
    };

    ContributorStats {
        stories,
        proverbs,
        art,
        music,
        total,
        badges,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use griot_common::content::{
        ArtDetails, ContentStatus, KindDetails, MusicDetails, ProverbDetails, StoryDetails,
    };
    use uuid::Uuid;

    fn contributor(created_at: DateTime<Utc>) -> Contributor {
        Contributor {
            id: Uuid::new_v4(),
            first_name: "Ama".to_string(),
            last_name: "Mensah".to_string(),
            email: "ama@example.com".to_string(),
            region: "Volta".to_string(),
            bio: None,
            role: "contributor".to_string(),
            created_at,
        }
    }

    fn item(kind: ContentKind) -> UnifiedContent {
        let details = match kind {
            ContentKind::Stories => KindDetails::Story(StoryDetails {
                body: "b".into(),
                read_time: "5 min".into(),
                moral_lesson: "m".into(),
                context: "c".into(),
                difficulty: None,
                cover_image: None,
            }),
            ContentKind::Proverbs => KindDetails::Proverb(ProverbDetails {
                body: "b".into(),
                english_translation: "e".into(),
                proverb_category: None,
                difficulty: None,
            }),
            ContentKind::Art => KindDetails::Art(ArtDetails {
                body: "b".into(),
                technique: "t".into(),
                medium: "m".into(),
                time_to_create: None,
                difficulty: None,
                booking_available: false,
                booking_venue: None,
                booking_price: None,
            }),
            ContentKind::Music => KindDetails::Music(MusicDetails {
                body: None,
                genre: "g".into(),
                audio_url: "https://cdn/a.mp3".into(),
                tags: None,
                tempo: None,
                cover_image: None,
            }),
        };
        UnifiedContent {
            id: Uuid::new_v4(),
            title: "t".into(),
            description: "d".into(),
            region: "r".into(),
            content_type: kind,
            status: ContentStatus::Approved,
            is_featured: false,
            rejection_reason: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            contributor: None,
            details,
        }
    }

    fn items(counts: [usize; 4]) -> Vec<UnifiedContent> {
        let mut out = Vec::new();
        for _ in 0..counts[0] {
            out.push(item(ContentKind::Stories));
        }
        for _ in 0..counts[1] {
            out.push(item(ContentKind::Proverbs));
        }
        for _ in 0..counts[2] {
            out.push(item(ContentKind::Art));
        }
        for _ in 0..counts[3] {
            out.push(item(ContentKind::Music));
        }
        out
    }

    #[test]
    fn test_per_kind_counts() {
        let stats = compute(&contributor(Utc::now()), &items([2, 3, 1, 0]));
        assert_eq!(stats.stories, 2);
        assert_eq!(stats.proverbs, 3);
        assert_eq!(stats.art, 1);
        assert_eq!(stats.music, 0);
        assert_eq!(stats.total, 6);
    }

    #[test]
    fn test_storyteller_boundary() {
        let who = contributor(Utc::now());
        assert!(!compute(&who, &items([2, 0, 0, 0])).badges.storyteller);
        assert!(compute(&who, &items([3, 0, 0, 0])).badges.storyteller);
    }

    #[test]
    fn test_wisdom_keeper_boundary() {
        let who = contributor(Utc::now());
        assert!(!compute(&who, &items([0, 2, 0, 0])).badges.wisdom_keeper);
        assert!(compute(&who, &items([0, 3, 0, 0])).badges.wisdom_keeper);
    }

    #[test]
    fn test_custodian_boundary() {
        let who = contributor(Utc::now());
        assert!(!compute(&who, &items([3, 3, 3, 0])).badges.custodian);
        assert!(compute(&who, &items([3, 3, 3, 1])).badges.custodian);
    }

    #[test]
    fn test_four_traditions_requires_every_kind() {
        let who = contributor(Utc::now());
        assert!(compute(&who, &items([1, 1, 1, 1])).badges.four_traditions);

        // Zeroing any one kind breaks the badge, tested at each boundary
        assert!(!compute(&who, &items([0, 1, 1, 1])).badges.four_traditions);
        assert!(!compute(&who, &items([1, 0, 1, 1])).badges.four_traditions);
        assert!(!compute(&who, &items([1, 1, 0, 1])).badges.four_traditions);
        assert!(!compute(&who, &items([1, 1, 1, 0])).badges.four_traditions);
    }

    #[test]
    fn test_founding_contributor_window() {
        let early = contributor(Utc.with_ymd_and_hms(2023, 9, 1, 0, 0, 0).unwrap());
        assert!(compute(&early, &[]).badges.founding_contributor);

        let late = contributor(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
        assert!(!compute(&late, &[]).badges.founding_contributor);
    }

    #[test]
    fn test_empty_feed() {
        let stats = compute(&contributor(Utc::now()), &[]);
        assert_eq!(stats.total, 0);
        assert!(!stats.badges.storyteller);
        assert!(!stats.badges.four_traditions);
        assert!(!stats.badges.custodian);
    }
}
