//! Selection and broadcast behaviour of the visualization manager against
//! real CSV files.

use csv_overlay::data::LoadError;
use csv_overlay::viz::{
    ConfigChange, DisplayState, PlotKind, RenderConfig, Rgb, SelectionState,
    VisualizationManager,
};
use std::collections::BTreeSet;
use std::fs;
use tempfile::TempDir;

fn folder() -> TempDir {
    let dir = tempfile::tempdir().expect("create temp dir");
    fs::write(dir.path().join("a.csv"), "time,temp\n1,20.5\n2,21.0\n3,21.4\n").expect("write a");
    fs::write(dir.path().join("b.csv"), "time,rh\n1,40\n2,42\n3,45\n").expect("write b");
    fs::write(dir.path().join("empty.csv"), "").expect("write empty");
    fs::write(dir.path().join("labels.csv"), "time,site\n1,north\n2,south\n").expect("write labels");
    dir
}

fn select(ids: &[&str]) -> BTreeSet<String> {
    ids.iter().map(|s| s.to_string()).collect()
}

fn manager(dir: &TempDir) -> VisualizationManager {
    VisualizationManager::with_csv(dir.path(), RenderConfig::default())
}

#[test]
fn common_columns_follow_selection() {
    let dir = folder();
    let mut mgr = manager(&dir);

    mgr.on_selection_changed(select(&["a.csv", "b.csv"]));
    assert_eq!(mgr.common_columns(), ["time"]);

    mgr.on_selection_changed(select(&["a.csv"]));
    assert_eq!(mgr.common_columns(), ["time", "temp"]);
    assert_eq!(mgr.units().len(), 1);
    assert_eq!(mgr.state_of("b.csv"), None);
}

#[test]
fn new_unit_gets_broadcast_config() {
    let dir = folder();
    let mut mgr = manager(&dir);

    mgr.on_selection_changed(select(&["a.csv"]));
    assert_eq!(mgr.config().x_column, "time");
    assert_eq!(mgr.config().y_column, "time");

    mgr.on_config_changed(ConfigChange::YColumn("temp".into()));
    mgr.on_config_changed(ConfigChange::Kind(PlotKind::Line));
    mgr.on_config_changed(ConfigChange::Color(Rgb::new(200, 10, 10)));

    mgr.on_selection_changed(select(&["a.csv", "b.csv"]));

    // temp is gone from the common columns, so y falls back to the first one.
    assert_eq!(mgr.config().y_column, "time");
    for unit in mgr.units() {
        assert_eq!(unit.config(), mgr.config());
        assert!(unit.is_ready());
    }
    assert_eq!(mgr.config().kind, PlotKind::Line);
    assert_eq!(mgr.config().color, Rgb::new(200, 10, 10));
}

#[test]
fn composite_keeps_selection_order() {
    let dir = folder();
    let mut mgr = manager(&dir);

    mgr.toggle("b.csv", true);
    mgr.toggle("a.csv", true);

    let view = mgr.display().composite().expect("composite");
    let sources: Vec<&str> = view.layers.iter().map(|l| l.source.as_str()).collect();
    assert_eq!(sources, ["b.csv", "a.csv"]);
}

#[test]
fn empty_file_fails_without_unit() {
    let dir = folder();
    let mut mgr = manager(&dir);
    mgr.on_selection_changed(select(&["a.csv"]));
    let before = mgr.diagnostics().len();

    mgr.on_selection_changed(select(&["a.csv", "empty.csv"]));

    assert_eq!(
        mgr.state_of("empty.csv"),
        Some(&SelectionState::Failed(LoadError::Empty))
    );
    assert_eq!(mgr.units().len(), 1);
    assert_eq!(mgr.diagnostics().len(), before + 1);
    let entry = mgr.diagnostics().entries().last().expect("entry");
    assert!(entry.message.contains("empty.csv"));
    assert_eq!(mgr.diagnostics().for_source("empty.csv").count(), 1);

    // Other files are untouched.
    assert_eq!(mgr.common_columns(), ["time", "temp"]);
    assert!(matches!(mgr.display(), DisplayState::Composite(_)));
}

#[test]
fn failed_file_is_retried_on_next_selection() {
    let dir = folder();
    let mut mgr = manager(&dir);

    mgr.toggle("empty.csv", true);
    assert!(matches!(mgr.state_of("empty.csv"), Some(SelectionState::Failed(_))));

    mgr.toggle("empty.csv", false);
    assert_eq!(mgr.state_of("empty.csv"), None);
    assert_eq!(mgr.display(), &DisplayState::NothingToShow);

    fs::write(dir.path().join("empty.csv"), "time,temp\n1,2\n").expect("fill file");
    mgr.toggle("empty.csv", true);
    assert_eq!(mgr.state_of("empty.csv"), Some(&SelectionState::Live));
}

#[test]
fn missing_axis_column_excludes_only_that_unit() {
    let dir = folder();
    let mut mgr = manager(&dir);
    mgr.on_selection_changed(select(&["a.csv", "b.csv"]));
    mgr.on_config_changed(ConfigChange::YColumn("temp".into()));

    let a = mgr.units().iter().find(|u| u.id() == "a.csv").expect("a");
    let b = mgr.units().iter().find(|u| u.id() == "b.csv").expect("b");
    assert!(a.is_ready());
    assert!(!b.is_ready());
    assert!(b.drawable().is_none());

    let view = mgr.display().composite().expect("composite");
    assert_eq!(view.layers.len(), 1);
    assert_eq!(view.layers[0].source, "a.csv");
}

#[test]
fn render_failure_is_isolated() {
    let dir = folder();
    let mut mgr = manager(&dir);
    mgr.on_selection_changed(select(&["a.csv", "labels.csv"]));
    assert_eq!(mgr.common_columns(), ["time"]);

    let before = mgr.diagnostics().len();
    // Text y column: a.csv lacks it, labels.csv cannot plot it.
    mgr.on_config_changed(ConfigChange::YColumn("site".into()));
    assert_eq!(mgr.diagnostics().len(), before + 1);
    assert_eq!(mgr.diagnostics().for_source("labels.csv").count(), 1);
    assert_eq!(mgr.display(), &DisplayState::NothingToShow);

    mgr.on_config_changed(ConfigChange::YColumn("time".into()));
    let view = mgr.display().composite().expect("composite");
    assert_eq!(view.layers.len(), 2);
}

#[test]
fn broadcast_is_idempotent() {
    let dir = folder();
    let mut mgr = manager(&dir);
    mgr.on_selection_changed(select(&["a.csv", "b.csv"]));

    mgr.broadcast();
    let first = mgr.display().clone();
    mgr.broadcast();
    assert_eq!(mgr.display(), &first);
}

#[test]
fn removing_last_file_shows_nothing() {
    let dir = folder();
    let mut mgr = manager(&dir);
    mgr.on_selection_changed(select(&["a.csv"]));
    assert!(mgr.display().composite().is_some());

    mgr.on_selection_changed(BTreeSet::new());
    assert!(mgr.common_columns().is_empty());
    assert!(mgr.units().is_empty());
    assert_eq!(mgr.display(), &DisplayState::NothingToShow);
    assert!(mgr.config().x_column.is_empty());
}

#[test]
fn files_leaving_the_folder_are_deselected() {
    let dir = folder();
    let mut mgr = manager(&dir);
    mgr.on_selection_changed(select(&["a.csv", "b.csv"]));

    mgr.retain_known(&select(&["a.csv", "empty.csv"]));
    assert_eq!(mgr.selection(), &select(&["a.csv"]));
    assert_eq!(mgr.units().len(), 1);
}

#[test]
fn switching_folder_clears_selection() {
    let dir = folder();
    let other = tempfile::tempdir().expect("other dir");
    let mut mgr = manager(&dir);
    mgr.on_selection_changed(select(&["a.csv"]));

    mgr.set_folder(other.path());
    assert!(mgr.selection().is_empty());
    assert!(mgr.units().is_empty());
    assert_eq!(mgr.folder(), other.path());

    // a.csv does not exist in the new folder.
    mgr.toggle("a.csv", true);
    assert!(matches!(
        mgr.state_of("a.csv"),
        Some(SelectionState::Failed(LoadError::Io(_)))
    ));
}

#[test]
fn mixed_x_kinds_share_one_category_axis() {
    let dir = tempfile::tempdir().expect("create temp dir");
    fs::write(dir.path().join("a.csv"), "time,val\n1,10\n2,20\n3,30\n").expect("write a");
    fs::write(dir.path().join("b.csv"), "time,val\nmon,5\ntue,6\nwed,7\n").expect("write b");
    let mut mgr = manager(&dir);

    mgr.on_selection_changed(select(&["a.csv", "b.csv"]));
    mgr.on_config_changed(ConfigChange::YColumn("val".into()));

    let view = mgr.display().composite().expect("composite");
    assert_eq!(view.x_categories, ["1", "2", "3", "mon", "tue", "wed"]);
    for layer in &view.layers {
        for point in &layer.points {
            let label = view.category_label(point[0]).expect("label");
            match layer.source.as_str() {
                "a.csv" => assert_eq!(label.parse::<f64>().ok(), Some(point[1] / 10.0)),
                _ => assert!(["mon", "tue", "wed"].contains(&label)),
            }
        }
    }
}

#[test]
fn repeated_render_failure_is_logged_once() {
    let dir = folder();
    let mut mgr = manager(&dir);
    mgr.on_selection_changed(select(&["labels.csv"]));
    mgr.on_config_changed(ConfigChange::YColumn("site".into()));
    assert_eq!(mgr.diagnostics().for_source("labels.csv").count(), 1);

    // Unrelated edits and broadcasts do not repeat the same failure.
    mgr.on_config_changed(ConfigChange::Kind(PlotKind::Bar));
    mgr.broadcast();
    assert_eq!(mgr.diagnostics().for_source("labels.csv").count(), 1);

    // Once it renders again, a new failure is reported.
    mgr.on_config_changed(ConfigChange::YColumn("time".into()));
    mgr.on_config_changed(ConfigChange::YColumn("site".into()));
    assert_eq!(mgr.diagnostics().for_source("labels.csv").count(), 2);
}

#[test]
fn selected_keeps_insertion_order() {
    let dir = folder();
    let mut mgr = manager(&dir);

    mgr.toggle("labels.csv", true);
    mgr.toggle("empty.csv", true);
    mgr.toggle("a.csv", true);
    assert_eq!(mgr.selected(), ["labels.csv", "empty.csv", "a.csv"]);

    mgr.toggle("empty.csv", false);
    mgr.toggle("b.csv", true);
    assert_eq!(mgr.selected(), ["labels.csv", "a.csv", "b.csv"]);

    mgr.set_folder(dir.path());
    assert!(mgr.selected().is_empty());
}
