//! Breadcrumb Trail
//!
//! The row of clickable ancestor folders above the listing. Clicking a
//! segment truncates everything to its right; clicking home clears the
//! trail. The click listener is consulted before anything is removed and
//! may veto the navigation.

use serde::{Deserialize, Serialize};

/// Identifier of a trail segment
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SegmentTag {
    /// Root/home sentinel
    Home,
    /// Accumulated path of the segment
    Path(String),
}

impl SegmentTag {
    pub fn is_home(&self) -> bool {
        matches!(self, SegmentTag::Home)
    }

    pub fn as_path(&self) -> Option<&str> {
        match self {
            SegmentTag::Home => None,
            SegmentTag::Path(p) => Some(p),
        }
    }
}

/// One visible segment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathSegment {
    pub name: String,
    pub tag: SegmentTag,
    /// Insertion order; strictly increasing left to right
    pub position: u32,
}

/// Answer of the segment click listener
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDecision {
    Proceed,
    Reject,
}

/// Label used for the home segment
pub const HOME_LABEL: &str = "home";

/// Serializable copy of a trail, for restoring it in a later session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrailSnapshot {
    pub segments: Vec<PathSegment>,
}

/// Ordered breadcrumb segments for one picker session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BreadcrumbTrail {
    segments: Vec<PathSegment>,
}

impl BreadcrumbTrail {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    pub fn contains(&self, tag: &SegmentTag) -> bool {
        self.segments.iter().any(|s| &s.tag == tag)
    }

    fn next_position(&self) -> u32 {
        self.segments
            .iter()
            .map(|s| s.position)
            .max()
            .map(|p| p + 1)
            .unwrap_or(0)
    }

    /// Reset the trail to a single home segment at position 0
    pub fn add_home(&mut self) {
        self.segments.clear();
        self.segments.push(PathSegment {
            name: HOME_LABEL.to_string(),
            tag: SegmentTag::Home,
            position: 0,
        });
    }

    /// Append a segment whose tag is the previous segment's path joined with `name`
    pub fn add_segment(&mut self, name: impl Into<String>) {
        let name = name.into();
        let tag = match self.last().and_then(|s| s.tag.as_path()) {
            Some(parent) => format!("{}/{}", parent.trim_end_matches('/'), name),
            None => name.clone(),
        };
        self.push(name, SegmentTag::Path(tag));
    }

    /// Append a segment with an explicit path tag (storage roots carry a
    /// display title that differs from their path)
    pub fn add_root_segment(&mut self, name: impl Into<String>, path: impl Into<String>) {
        self.push(name.into(), SegmentTag::Path(path.into()));
    }

    fn push(&mut self, name: String, tag: SegmentTag) {
        let position = self.next_position();
        self.segments.push(PathSegment {
            name,
            tag,
            position,
        });
    }

    /// Handle a click on the segment tagged `tag`.
    ///
    /// The listener is notified first. Only on `Proceed` is the trail mutated:
    /// home clears every segment, any other tag drops the segments positioned
    /// after it. A tag not present in the trail is still reported to the
    /// listener but removes nothing.
    pub fn select_segment<F>(&mut self, tag: &SegmentTag, mut listener: F) -> NavigationDecision
    where
        F: FnMut(&SegmentTag) -> NavigationDecision,
    {
        let decision = listener(tag);
        if decision == NavigationDecision::Reject {
            return decision;
        }

        if tag.is_home() {
            self.segments.clear();
        } else {
            self.truncate_after(tag);
        }
        decision
    }

    /// Remove every segment positioned strictly after `tag`.
    ///
    /// Returns false when `tag` is not in the trail.
    pub fn truncate_after(&mut self, tag: &SegmentTag) -> bool {
        let position = match self.segments.iter().find(|s| &s.tag == tag) {
            Some(segment) => segment.position,
            None => return false,
        };
        self.segments.retain(|s| s.position <= position);
        true
    }

    /// Drop all segments (dialog closed)
    pub fn clear(&mut self) {
        self.segments.clear();
    }

    pub fn snapshot(&self) -> TrailSnapshot {
        TrailSnapshot {
            segments: self.segments.clone(),
        }
    }

    /// Rebuild from a snapshot. Segments are re-sorted by position and a
    /// snapshot without a leading home segment gets one.
    pub fn restore(&mut self, snapshot: TrailSnapshot) {
        let mut segments = snapshot.segments;
        segments.sort_by_key(|s| s.position);
        segments.dedup_by(|a, b| a.position == b.position);

        if segments.is_empty() {
            self.segments.clear();
            return;
        }

        if !segments[0].tag.is_home() {
            self.add_home();
            for segment in segments.into_iter().filter(|s| !s.tag.is_home()) {
                self.push(segment.name, segment.tag);
            }
        } else {
            self.segments = segments;
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.snapshot())
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let snapshot: TrailSnapshot = serde_json::from_str(json)?;
        let mut trail = Self::new();
        trail.restore(snapshot);
        Ok(trail)
    }
}
