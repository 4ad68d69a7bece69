//! Baseline reconciliation: separating accepted diagnostics from new ones.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use strix_diagnostic::CanonicalDiagnostic;
use strix_ir::{Category, HintTier};

use crate::diff::sequence_matches;
use crate::model::{BaselineEntry, BaselineFile};

/// Result of reconciling one file.
#[derive(Clone, Debug, Default)]
pub struct Reconciled {
    /// What the user sees: new diagnostics unchanged, baselined ones either
    /// absent or demoted to a hint tier.
    pub visible: Vec<CanonicalDiagnostic>,
    /// The file's entries for a rebuilt baseline: every currently-observed
    /// diagnostic, matched or not.
    pub entries: Vec<BaselineEntry>,
}

/// Pick the demotion tier for a rule's supported tier set.
///
/// Exactly one tier applies even when a rule nominally lists several:
/// the first entry of [`HintTier::PRIORITY`] the rule supports wins.
pub fn demotion_for(supported: &[HintTier]) -> Option<HintTier> {
    HintTier::PRIORITY
        .into_iter()
        .find(|tier| supported.contains(tier))
}

/// Reconcile one file's current diagnostics against its previous baseline
/// entries.
///
/// Fingerprint-matched pairs are "baselined": suppressed from `visible`
/// unless the rule supports a hint tier, in which case the diagnostic stays
/// visible once, demoted to that tier. Entries only on the old side are
/// dropped silently; diagnostics only on the new side pass through
/// unchanged.
pub fn reconcile(previous: &[BaselineEntry], current: &[CanonicalDiagnostic]) -> Reconciled {
    let pairs = sequence_matches(previous, current, |entry, diag| {
        entry.matches(&diag.fingerprint())
    });
    let mut baselined = vec![false; current.len()];
    for (_, new_index) in pairs {
        baselined[new_index] = true;
    }

    let mut visible = Vec::with_capacity(current.len());
    for (diag, baselined) in current.iter().zip(&baselined) {
        if !baselined {
            visible.push(diag.clone());
            continue;
        }
        let tier = diag.rule.and_then(|rule| demotion_for(rule.hint_tiers()));
        if let Some(tier) = tier {
            visible.push(diag.clone().with_category(Category::Hint(tier)));
        }
    }

    Reconciled {
        visible,
        entries: current.iter().map(BaselineEntry::from_diagnostic).collect(),
    }
}

/// How much of the project an "update baseline" run scanned.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum ScanMode {
    /// Every project file was analyzed; files absent from the scan are
    /// candidates for pruning, confirmed against the filesystem.
    Exhaustive,
    /// Fast path (e.g. only open editor files): no existence checks, files
    /// outside the scan keep their baseline entries untouched.
    OpenFilesOnly,
}

/// Capability to confirm a project-relative file still exists.
///
/// Injected so rebuild semantics stay testable without fixtures.
pub trait FileCheck {
    fn exists(&self, relative: &Path) -> bool;
}

/// Filesystem-backed [`FileCheck`] rooted at the project directory.
pub struct FsFileCheck {
    root: PathBuf,
}

impl FsFileCheck {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FsFileCheck { root: root.into() }
    }
}

impl FileCheck for FsFileCheck {
    fn exists(&self, relative: &Path) -> bool {
        self.root.join(relative).exists()
    }
}

/// Rebuild the whole baseline after an "update baseline" run.
///
/// Union semantics: scanned files contribute exactly their observed entries
/// (a scanned file with zero diagnostics disappears); unscanned files keep
/// their previous entries so a partial run never erases coverage — except
/// that under [`ScanMode::Exhaustive`] a file confirmed gone from disk is
/// pruned.
pub fn rebuild(
    previous: &BaselineFile,
    observed: &BTreeMap<String, Vec<BaselineEntry>>,
    mode: ScanMode,
    fs: &dyn FileCheck,
) -> BaselineFile {
    let mut rebuilt = BaselineFile::empty();
    for (path, entries) in observed {
        rebuilt.insert(path.clone(), entries.clone());
    }
    for (path, entries) in &previous.files {
        if observed.contains_key(path) {
            continue;
        }
        let keep = match mode {
            ScanMode::OpenFilesOnly => true,
            ScanMode::Exhaustive => fs.exists(Path::new(path)),
        };
        if keep {
            rebuilt.insert(path.clone(), entries.clone());
        } else {
            tracing::debug!(path, "pruning baseline entries for deleted file");
        }
    }
    rebuilt
}
