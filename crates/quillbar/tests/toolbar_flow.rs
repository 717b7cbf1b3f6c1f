//! End-to-end formatting flows through the controller.
//!
//! These tests drive [`FormatController`] against the in-memory reference
//! buffer the way a toolbar host would: set a selection, fire commands,
//! observe the buffer and the outward signals.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use quillbar::prelude::*;

fn setup() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn controller_with(text: &str) -> FormatController<MemoryBuffer> {
    setup();
    let buffer = MemoryBuffer::from_text(text);
    let catalog = FontCatalog::with_families(["Arial", "Georgia", "Lucida Console"]);
    FormatController::new(buffer, catalog)
}

fn select(controller: &mut FormatController<MemoryBuffer>, start: usize, len: usize) {
    controller.buffer_mut().set_selection(Selection::new(start, len));
}

#[test]
fn family_change_keeps_each_runs_size() {
    let mut controller = controller_with("small and BIG");
    controller
        .buffer_mut()
        .set_font(0..9, &FontSpec::new("Arial", 10.0));
    controller
        .buffer_mut()
        .set_font(9..13, &FontSpec::new("Arial", 28.0));
    select(&mut controller, 0, 13);

    controller.set_font_family("Georgia");

    let buffer = controller.buffer();
    for i in 0..9 {
        assert_eq!(buffer.font_at(i).family, "Georgia");
        assert_eq!(buffer.font_at(i).size, 10.0);
    }
    for i in 9..13 {
        assert_eq!(buffer.font_at(i).family, "Georgia");
        assert_eq!(buffer.font_at(i).size, 28.0);
    }
    assert_eq!(buffer.selection(), Selection::new(0, 13));
}

#[test]
fn size_change_keeps_each_runs_family() {
    let mut controller = controller_with("serif sans");
    controller
        .buffer_mut()
        .set_font(0..5, &FontSpec::new("Georgia", 12.0));
    controller
        .buffer_mut()
        .set_font(5..10, &FontSpec::new("Arial", 12.0));
    select(&mut controller, 0, 10);

    controller.set_font_size("20");

    let buffer = controller.buffer();
    assert_eq!(buffer.font_at(0).family, "Georgia");
    assert_eq!(buffer.font_at(9).family, "Arial");
    for i in 0..10 {
        assert_eq!(buffer.font_at(i).size, 20.0);
    }
}

#[test]
fn double_superscript_restores_size_and_offset() {
    let mut controller = controller_with("x2");
    controller
        .buffer_mut()
        .set_font(0..2, &FontSpec::new("Arial", 11.0));
    select(&mut controller, 1, 1);

    controller.toggle_superscript();
    assert!((controller.buffer().font_at(1).size - 8.8).abs() < 1e-4);
    assert!(controller.buffer().baseline_offset_at(1) > 0);
    assert!(controller.indicators().superscript);

    controller.toggle_superscript();
    assert!((controller.buffer().font_at(1).size - 11.0).abs() < 1e-4);
    assert_eq!(controller.buffer().baseline_offset_at(1), 0);
    assert!(!controller.indicators().superscript);

    // Untouched neighbor kept its size all along.
    assert_eq!(controller.buffer().font_at(0).size, 11.0);
}

#[test]
fn subscript_to_superscript_does_not_compound_scale() {
    let mut controller = controller_with("hh");
    controller
        .buffer_mut()
        .set_font(0..2, &FontSpec::new("Arial", 10.0));
    select(&mut controller, 0, 2);

    controller.toggle_subscript();
    controller.toggle_superscript();

    assert!((controller.buffer().font_at(0).size - 8.0).abs() < 1e-4);
    assert!(controller.indicators().superscript);
    assert!(!controller.indicators().subscript);
}

#[test]
fn indent_scenario_three_lines() {
    let mut controller = controller_with("abc\ndef\nghi");
    select(&mut controller, 2, 7);

    controller.indent();
    assert_eq!(controller.buffer().text(), "\tabc\n\tdef\n\tghi");

    controller.outdent();
    assert_eq!(controller.buffer().text(), "abc\ndef\nghi");
}

#[test]
fn outdent_removes_only_existing_spaces() {
    let mut controller = controller_with("  two spaces");
    select(&mut controller, 0, 12);

    controller.outdent();

    assert_eq!(controller.buffer().text(), "two spaces");
}

#[test]
fn sentence_case_scenario() {
    let mut controller = controller_with("hello world. new sentence");
    select(&mut controller, 0, 25);

    controller.transform_case(CaseMode::SentenceStart);

    assert_eq!(controller.buffer().text(), "Hello world. New sentence");
    assert_eq!(controller.buffer().selection(), Selection::new(0, 25));
}

#[test]
fn painter_copies_captured_format_onto_plain_selection() {
    let mut controller = controller_with("source text\nplain target");
    {
        let buffer = controller.buffer_mut();
        buffer.set_font(0..6, &FontSpec::new("Arial", 14.0).with_bold(true));
        buffer.set_text_color(0..6, Color::RED);
        buffer.set_paragraph_format(
            0..6,
            &ParagraphFormat::new()
                .with_alignment(Alignment::Center)
                .with_bullet(true)
                .with_bullet_indent(12),
        );
    }

    select(&mut controller, 1, 3);
    controller.capture_format();
    assert!(controller.indicators().painter_armed);

    // The user drags a new selection over the plain line and releases.
    select(&mut controller, 12, 5);
    controller.note_pointer_released();

    let buffer = controller.buffer();
    for i in 12..17 {
        assert_eq!(buffer.font_at(i), FontSpec::new("Arial", 14.0).with_bold(true));
        assert_eq!(buffer.text_color_at(i), Color::RED);
    }
    let paragraph = buffer.paragraph_format_at(12);
    assert_eq!(paragraph.alignment, Alignment::Center);
    assert!(paragraph.bullet);
    assert_eq!(paragraph.bullet_indent, 12);
    assert!(!controller.indicators().painter_armed);
}

#[test]
fn painter_applies_exactly_once() {
    let mut controller = controller_with("red\nplain more");
    controller.buffer_mut().set_text_color(0..3, Color::RED);

    select(&mut controller, 0, 3);
    controller.capture_format();

    select(&mut controller, 4, 5);
    controller.note_pointer_released();
    assert_eq!(controller.buffer().text_color_at(4), Color::RED);

    // A later release with a new selection paints nothing.
    select(&mut controller, 10, 4);
    controller.note_pointer_released();
    assert_eq!(controller.buffer().text_color_at(10), Color::BLACK);
}

#[test]
fn unparseable_size_reverts_displayed_value() {
    let mut controller = controller_with("hello");
    select(&mut controller, 0, 5);
    controller.set_font_size("16");

    let edits = Arc::new(AtomicUsize::new(0));
    let edits_clone = edits.clone();
    controller.content_changed.connect(move |()| {
        edits_clone.fetch_add(1, Ordering::SeqCst);
    });

    let displayed = Arc::new(Mutex::new(String::new()));
    let displayed_clone = displayed.clone();
    controller.indicators_changed.connect(move |indicators| {
        *displayed_clone.lock().unwrap() = indicators.size_text.clone();
    });

    controller.set_font_size("abc");

    // Nothing was written, no edit was reported, and the combo shows the
    // true size again.
    assert_eq!(controller.buffer().font_at(0).size, 16.0);
    assert_eq!(edits.load(Ordering::SeqCst), 0);
    assert_eq!(displayed.lock().unwrap().as_str(), "16");
}

#[test]
fn each_command_reports_one_edit() {
    let mut controller = controller_with("abc\ndef");
    let count = controller.buffer().char_count();
    select(&mut controller, 0, count);

    let edits = Arc::new(AtomicUsize::new(0));
    let edits_clone = edits.clone();
    controller.content_changed.connect(move |()| {
        edits_clone.fetch_add(1, Ordering::SeqCst);
    });

    controller.toggle_bold();
    assert_eq!(edits.load(Ordering::SeqCst), 1);

    controller.transform_case(CaseMode::AllUpper);
    assert_eq!(edits.load(Ordering::SeqCst), 2);

    controller.indent();
    assert_eq!(edits.load(Ordering::SeqCst), 3);
}

#[test]
fn indicators_follow_selection_changes() {
    let mut controller = controller_with("bold plain");
    controller
        .buffer_mut()
        .set_font(0..4, &FontSpec::default().with_bold(true));

    let last_bold = Arc::new(AtomicUsize::new(usize::MAX));
    let last_bold_clone = last_bold.clone();
    controller.indicators_changed.connect(move |indicators| {
        last_bold_clone.store(indicators.bold as usize, Ordering::SeqCst);
    });

    select(&mut controller, 0, 4);
    controller.note_selection_changed();
    assert_eq!(last_bold.load(Ordering::SeqCst), 1);

    select(&mut controller, 5, 5);
    controller.note_selection_changed();
    assert_eq!(last_bold.load(Ordering::SeqCst), 0);
}

#[test]
fn typing_edit_notification_sets_modified_flag() {
    let mut controller = controller_with("hello");
    assert!(!controller.content_modified());

    // Host reports a typing edit it performed itself.
    controller.buffer_mut().replace_range(5..5, "!");
    controller.note_content_changed();

    assert!(controller.content_modified());
    controller.reset_content_modified();
    assert!(!controller.content_modified());
}

#[test]
fn bullet_toggle_spans_selected_lines() {
    let mut controller = controller_with("one\ntwo\nthree");
    let count = controller.buffer().char_count();
    select(&mut controller, 0, count);

    controller.toggle_bullet();
    assert!(controller.buffer().paragraph_format_at(0).bullet);
    assert!(controller.buffer().paragraph_format_at(5).bullet);
    assert!(controller.buffer().paragraph_format_at(9).bullet);
    assert!(controller.indicators().bullet);

    controller.toggle_bullet();
    assert!(!controller.buffer().paragraph_format_at(5).bullet);
}

#[test]
fn alignment_applies_per_paragraph() {
    let mut controller = controller_with("left\ncentered\nleft");
    select(&mut controller, 5, 8);

    controller.set_alignment(Alignment::Center);

    let buffer = controller.buffer();
    assert_eq!(buffer.paragraph_format_at(0).alignment, Alignment::Left);
    assert_eq!(buffer.paragraph_format_at(6).alignment, Alignment::Center);
    assert_eq!(buffer.paragraph_format_at(15).alignment, Alignment::Left);
}
