//! Track editor: id assignment and the duplicate-language guard.
//!
//! The track model lets anyone build two autogenerated tracks for the same
//! language. Keeping the list free of duplicates is the editor's job.

use crate::languages::{list_languages, Language};

use super::{
    AutogeneratedTextTrack, CustomTextTrack, CustomTrackType, TrackError, TrackFile, TrackResult,
    UploadTextTrack,
};

/// Source of locally unique track ids.
pub trait TrackIdGenerator: Send {
    fn next_id(&mut self) -> String;
}

/// Random v4 UUIDs. Used by default.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidTrackIds;

impl TrackIdGenerator for UuidTrackIds {
    fn next_id(&mut self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Predictable ids (`track-1`, `track-2`, ...) for tests and dry runs.
#[derive(Debug, Clone)]
pub struct SequentialTrackIds {
    prefix: String,
    next: u64,
}

impl SequentialTrackIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl Default for SequentialTrackIds {
    fn default() -> Self {
        Self::new("track")
    }
}

impl TrackIdGenerator for SequentialTrackIds {
    fn next_id(&mut self) -> String {
        let id = format!("{}-{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

/// Builds tracks with fresh ids.
pub struct TrackEditor {
    ids: Box<dyn TrackIdGenerator>,
}

impl TrackEditor {
    /// Editor that assigns UUIDs.
    pub fn new() -> Self {
        Self::with_ids(UuidTrackIds)
    }

    pub fn with_ids<G: TrackIdGenerator + 'static>(ids: G) -> Self {
        Self { ids: Box::new(ids) }
    }

    pub fn autogenerated(&mut self, language_code: &str) -> TrackResult<AutogeneratedTextTrack> {
        AutogeneratedTextTrack::new(self.ids.next_id(), language_code)
    }

    pub fn custom(
        &mut self,
        name: impl Into<String>,
        kind: CustomTrackType,
        language_code: impl Into<String>,
        file: TrackFile,
    ) -> TrackResult<CustomTextTrack> {
        CustomTextTrack::new(self.ids.next_id(), name, kind, language_code, file)
    }
}

impl Default for TrackEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TrackEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackEditor").finish_non_exhaustive()
    }
}

/// Check whether `track` may join `existing`.
///
/// Rejects a second autogenerated track for the same language. Custom tracks
/// are never rejected here.
pub fn check_add(existing: &[UploadTextTrack], track: &UploadTextTrack) -> TrackResult<()> {
    let UploadTextTrack::Autogenerated(new) = track else {
        return Ok(());
    };

    let duplicate = existing
        .iter()
        .filter_map(UploadTextTrack::as_autogenerated)
        .any(|t| t.language_code == new.language_code);

    if duplicate {
        return Err(TrackError::DuplicateAutogeneratedLanguage {
            code: new.language_code.as_str().to_string(),
        });
    }
    Ok(())
}

/// Registry languages that do not have an autogenerated track yet, in
/// registry order. This is what the language picker should offer.
pub fn available_autogenerated_languages(existing: &[UploadTextTrack]) -> Vec<&'static Language> {
    list_languages()
        .iter()
        .filter(|lang| {
            !existing
                .iter()
                .filter_map(UploadTextTrack::as_autogenerated)
                .any(|t| t.language_code.as_str() == lang.code)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracks::vtt_file;

    #[test]
    fn sequential_ids_count_up() {
        let mut ids = SequentialTrackIds::new("t");
        assert_eq!(ids.next_id(), "t-1");
        assert_eq!(ids.next_id(), "t-2");
    }

    #[test]
    fn uuid_ids_are_unique() {
        let mut ids = UuidTrackIds;
        assert_ne!(ids.next_id(), ids.next_id());
    }

    #[test]
    fn duplicate_language_is_flagged_but_constructible() {
        let mut editor = TrackEditor::with_ids(SequentialTrackIds::default());
        let first: UploadTextTrack = editor.autogenerated("en").unwrap().into();
        // The model happily builds a second English track...
        let second: UploadTextTrack = editor.autogenerated("en").unwrap().into();
        assert_ne!(first.id(), second.id());

        // ...but the guard refuses to add it.
        let tracks = vec![first];
        assert_eq!(
            check_add(&tracks, &second),
            Err(TrackError::DuplicateAutogeneratedLanguage { code: "en".into() })
        );
    }

    #[test]
    fn custom_tracks_never_clash() {
        let mut editor = TrackEditor::with_ids(SequentialTrackIds::default());
        let auto: UploadTextTrack = editor.autogenerated("en").unwrap().into();
        let custom: UploadTextTrack = editor
            .custom("English", CustomTrackType::Subtitles, "en", vtt_file("en.vtt"))
            .unwrap()
            .into();
        assert!(check_add(&[auto], &custom).is_ok());
    }

    #[test]
    fn picker_hides_used_languages() {
        let mut editor = TrackEditor::with_ids(SequentialTrackIds::default());
        let tracks: Vec<UploadTextTrack> = vec![
            editor.autogenerated("en").unwrap().into(),
            editor.autogenerated("de").unwrap().into(),
        ];
        let available = available_autogenerated_languages(&tracks);
        assert_eq!(available.len(), 20);
        assert_eq!(available[0].code, "es");
        assert!(available.iter().all(|l| l.code != "de"));
    }
}
