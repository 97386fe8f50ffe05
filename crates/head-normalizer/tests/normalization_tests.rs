use head_normalizer::normalization::*;

#[test]
fn heading_text_collapses_whitespace_runs() {
    assert_eq!(heading_text("  Emergency \n\t Tree   Service "), "Emergency Tree Service");
}

#[test]
fn heading_text_composes_to_nfc() {
    assert_eq!(heading_text("Cafe\u{0301} Lawn"), "Caf\u{00E9} Lawn");
}

#[test]
fn heading_text_blank_is_empty() {
    assert_eq!(heading_text(" \n\t "), "");
}

#[test]
fn truncate_keeps_short_strings_verbatim() {
    assert_eq!(truncate_chars("Oak Pruning  ", 60), "Oak Pruning  ");
}

#[test]
fn truncate_cuts_at_limit() {
    let s = "a".repeat(70);
    assert_eq!(truncate_chars(&s, 60).chars().count(), 60);
}

#[test]
fn truncate_trims_dangling_space_after_cut() {
    assert_eq!(truncate_chars("Tree Removal Services", 13), "Tree Removal");
}

#[test]
fn truncate_counts_characters_not_bytes() {
    let s = "é".repeat(10);
    assert_eq!(truncate_chars(&s, 4), "éééé");
}

#[test]
fn title_case_from_hyphens() {
    assert_eq!(title_case_segment("tree-removal"), "Tree Removal");
}

#[test]
fn title_case_collapses_runs_of_separators() {
    assert_eq!(title_case_segment("stump--grinding__and-more"), "Stump Grinding And More");
}

#[test]
fn title_case_keeps_rest_of_word() {
    assert_eq!(title_case_segment("faq-ISA-certified"), "Faq ISA Certified");
}

#[test]
fn title_case_empty() {
    assert_eq!(title_case_segment(""), "");
    assert_eq!(title_case_segment("--"), "");
}
