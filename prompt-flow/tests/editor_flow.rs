use prompt_flow::{
    tokenize, Board, BatchImportResponse, Cursor, FlowError, LibrarySnapshot, PromptFormat,
};

fn board() -> Board {
    let snapshot: LibrarySnapshot = serde_json::from_str(
        r##"{
            "tags": [
                {"id": "t1", "name_en": "1girl", "name_zh": "一个女孩", "category_id": "char"},
                {"id": "t2", "name_en": "masterpiece", "name_zh": "杰作", "category_id": "quality", "weight": 1.2},
                {"id": "t3", "name_en": "beautiful", "name_zh": "美丽", "category_id": "quality"}
            ],
            "categories": [
                {"id": "char", "name_en": "Character", "name_zh": "角色", "color": "#f97316"},
                {"id": "quality", "name_en": "Quality", "name_zh": "质量"}
            ]
        }"##,
    )
    .unwrap();
    let mut board = Board::new();
    board.library.replace_all(snapshot);
    board
}

const TEXT: &str = "1girl, (masterpiece:1.2), <lora:x:0.8>, {beautiful}";

#[test]
fn tokenizer_strips_lora_and_weights() {
    assert_eq!(tokenize(TEXT), ["1girl", "masterpiece", "beautiful"]);
}

#[test]
fn parse_commit_and_format() {
    let mut board = board();
    let library = board.library.tags().to_vec();

    board.editor.load_text(TEXT, &library).unwrap();
    assert!(board.editor.items().iter().all(|t| t.from_library));

    board.run("editor-select-all", None).unwrap();
    board.run("editor-commit", None).unwrap();
    board.dispatch(prompt_flow::Action::SetFormat(PromptFormat::Sd)).unwrap();

    assert_eq!(board.prompt(), "1girl, (masterpiece:1.2), beautiful");
    assert_eq!(board.selection.cursor(), Cursor::Append);
}

#[test]
fn commit_lands_at_cursor() {
    let mut board = board();
    board.run("toggle-tag", Some("t1")).unwrap();
    board.run("toggle-tag", Some("t3")).unwrap();
    board.run("set-cursor", Some("0")).unwrap();

    let library = board.library.tags().to_vec();
    board.editor.load_text("masterpiece, 1girl", &library).unwrap();
    board.run("editor-select-all", None).unwrap();
    board.run("editor-commit", None).unwrap();

    assert_eq!(board.prompt(), "1girl, masterpiece, beautiful");
    assert_eq!(board.selection.cursor(), Cursor::After(1));
}

#[test]
fn new_tags_are_saved_then_adopted() {
    let mut board = board();
    let library = board.library.tags().to_vec();
    board.editor.load_text("1girl, night sky", &library).unwrap();
    board.run("editor-select-all", None).unwrap();

    assert_eq!(
        board.editor.new_candidates(None),
        Err(FlowError::NoCategorySelected)
    );
    let candidates = board.editor.new_candidates(Some("quality")).unwrap();
    assert_eq!(candidates.len(), 1);

    board.run("editor-commit", None).unwrap();
    let response: BatchImportResponse = serde_json::from_str(
        r#"{"success": true, "imported": 1, "skipped": 0,
            "tags": [{"id": "t9", "name_en": "night sky", "name_zh": "夜空", "category_id": "quality"}]}"#,
    )
    .unwrap();

    // The commit closed the editor; the selection is still swapped over.
    assert_eq!(board.adopt_imported(response.tags), 1);
    assert!(board.library.tag("t9").is_some());
    let ids: Vec<_> = board.selection.tags().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, ["t1", "t9"]);
    assert_eq!(board.prompt(), "1girl, night sky");
}
