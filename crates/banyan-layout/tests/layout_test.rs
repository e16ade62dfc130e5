use banyan_core::{Person, Position};
use banyan_layout::{LayoutConfig, compute_auto_align_positions, compute_layout};

fn person(id: &str) -> Person {
    Person::with_id(id)
}

fn child_of(id: &str, parents: &[&str]) -> Person {
    let mut p = Person::with_id(id);
    p.parent_ids = parents.iter().map(|s| s.to_string()).collect();
    p
}

fn marry(people: &mut [Person], a: &str, b: &str) {
    let ai = people.iter().position(|p| p.id == a).unwrap();
    let bi = people.iter().position(|p| p.id == b).unwrap();
    people[ai].spouse_ids.push(b.to_string());
    people[bi].spouse_ids.push(a.to_string());
}

fn pos(layout: &banyan_layout::Layout, id: &str) -> Position {
    layout.positions[id]
}

/// Couple with two children, the bread-and-butter shape.
fn small_family() -> Vec<Person> {
    let mut people = vec![
        person("ravi"),
        person("meena"),
        child_of("arun", &["ravi", "meena"]),
        child_of("priya", &["ravi", "meena"]),
    ];
    marry(&mut people, "ravi", "meena");
    people
}

#[test]
fn empty_input_yields_the_minimum_canvas() {
    let cfg = LayoutConfig::default();
    let layout = compute_layout(&[], false, &cfg);
    assert!(layout.positions.is_empty());
    assert_eq!(layout.width, cfg.min_width);
    assert_eq!(layout.height, cfg.min_height);
}

#[test]
fn a_single_person_sits_at_the_padding_origin() {
    let cfg = LayoutConfig::default();
    let layout = compute_layout(&[person("only")], false, &cfg);
    assert_eq!(pos(&layout, "only"), Position { x: cfg.padding, y: cfg.padding });
    assert_eq!(layout.width, cfg.min_width);
    assert_eq!(layout.height, cfg.min_height);
}

#[test]
fn a_rootless_couple_shares_a_row_one_spouse_gap_apart() {
    let cfg = LayoutConfig::default();
    let mut people = vec![person("p1"), person("p2")];
    marry(&mut people, "p1", "p2");

    let layout = compute_layout(&people, false, &cfg);
    let a = pos(&layout, "p1");
    let b = pos(&layout, "p2");
    assert_eq!(a.y, b.y);
    assert_eq!((b.x - a.x).abs(), cfg.spouse_gap);
}

#[test]
fn parents_are_centered_over_their_children() {
    let cfg = LayoutConfig::default();
    let layout = compute_layout(&small_family(), false, &cfg);

    // Children pack the deepest row left to right.
    assert_eq!(pos(&layout, "arun"), Position { x: 80.0, y: 240.0 });
    assert_eq!(pos(&layout, "priya"), Position { x: 200.0, y: 240.0 });

    // The couple splits half a spouse gap either side of the children's midpoint (140).
    assert_eq!(pos(&layout, "ravi"), Position { x: 90.0, y: 80.0 });
    assert_eq!(pos(&layout, "meena"), Position { x: 190.0, y: 80.0 });
}

#[test]
fn sibling_groups_are_separated_by_the_group_gap() {
    let cfg = LayoutConfig::default();
    let people = vec![
        person("a"),
        person("b"),
        child_of("c1", &["a"]),
        child_of("c2", &["a"]),
        child_of("c3", &["b"]),
    ];
    let layout = compute_layout(&people, false, &cfg);

    let c1 = pos(&layout, "c1").x;
    let c2 = pos(&layout, "c2").x;
    let c3 = pos(&layout, "c3").x;
    assert!(c2 - c1 >= cfg.sibling_spacing);
    assert!(c3 - c2 >= cfg.sibling_spacing + cfg.group_gap);
}

#[test]
fn unparented_persons_trail_the_deepest_row() {
    let cfg = LayoutConfig::default();
    let mut people = vec![person("h"), person("w"), person("loner")];
    marry(&mut people, "h", "w");

    let layout = compute_layout(&people, false, &cfg);
    assert_eq!(pos(&layout, "h").x, 80.0);
    assert_eq!(pos(&layout, "w").x, 180.0);
    assert_eq!(pos(&layout, "loner").x, 300.0);
}

#[test]
fn childless_units_go_to_the_running_right_edge() {
    let cfg = LayoutConfig::default();
    let mut people = small_family();
    people.push(person("hermit"));

    let layout = compute_layout(&people, false, &cfg);
    // hermit shares the couple's row but anchors no children: placed after meena (190).
    assert_eq!(pos(&layout, "hermit"), Position { x: 310.0, y: 80.0 });
}

#[test]
fn repeated_spouse_units_sit_side_by_side_without_overlap() {
    let cfg = LayoutConfig::default();
    let mut people = vec![
        person("p"),
        person("s1"),
        person("s2"),
        child_of("c1", &["p", "s1"]),
        child_of("c2", &["p", "s2"]),
    ];
    marry(&mut people, "p", "s1");
    marry(&mut people, "p", "s2");

    let layout = compute_layout(&people, false, &cfg);
    // c1 at 80, c2 across the group gap at 280.
    assert_eq!(pos(&layout, "p").x, 30.0);
    assert_eq!(pos(&layout, "s1").x, 130.0);
    assert_eq!(pos(&layout, "s2").x, 330.0);

    let xs = [pos(&layout, "p").x, pos(&layout, "s1").x, pos(&layout, "s2").x];
    for (i, a) in xs.iter().enumerate() {
        for b in &xs[i + 1..] {
            assert!((a - b).abs() >= cfg.spouse_gap);
        }
    }
}

#[test]
fn manual_positions_win_unless_auto_align_is_forced() {
    let cfg = LayoutConfig::default();
    let mut people = small_family();
    people[2].position = Some(Position { x: 999.0, y: 999.0 });

    let kept = compute_layout(&people, false, &cfg);
    assert_eq!(pos(&kept, "arun"), Position { x: 999.0, y: 999.0 });
    // The override stretches the canvas.
    assert!(kept.width >= 999.0 + cfg.padding);

    let realigned = compute_layout(&people, true, &cfg);
    assert_eq!(pos(&realigned, "arun"), Position { x: 80.0, y: 240.0 });
    // Forcing auto-align must not mutate the input.
    assert_eq!(people[2].position, Some(Position { x: 999.0, y: 999.0 }));
}

#[test]
fn layout_is_deterministic_across_calls() {
    let cfg = LayoutConfig::default();
    let people = small_family();
    let first = compute_layout(&people, false, &cfg);
    let second = compute_layout(&people.clone(), false, &cfg);
    assert_eq!(first, second);
}

#[test]
fn canvas_grows_with_the_tree_and_respects_floors() {
    let cfg = LayoutConfig::default();
    let people: Vec<Person> = (0..12).map(|i| person(&format!("p{i}"))).collect();
    let layout = compute_layout(&people, false, &cfg);

    // 12 unparented persons across the bottom row: last sits at 80 + 11 * 120.
    let last = pos(&layout, "p11");
    assert_eq!(last.x, 80.0 + 11.0 * 120.0);
    assert_eq!(layout.width, last.x + cfg.padding);
    assert_eq!(layout.height, cfg.min_height);
}

#[test]
fn auto_align_helper_returns_positions_only() {
    let positions = compute_auto_align_positions(&small_family());
    assert_eq!(positions.len(), 4);
    assert!(positions.contains_key("ravi"));
    // Snapshot order is preserved.
    assert_eq!(
        positions.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["ravi", "meena", "arun", "priya"]
    );
}

#[test]
fn custom_spacing_is_honored() {
    let cfg = LayoutConfig {
        sibling_spacing: 10.0,
        group_gap: 5.0,
        generation_gap: 20.0,
        spouse_gap: 8.0,
        padding: 1.0,
        min_width: 50.0,
        min_height: 40.0,
    };
    let layout = compute_layout(&small_family(), false, &cfg);
    assert_eq!(pos(&layout, "arun"), Position { x: 1.0, y: 21.0 });
    assert_eq!(pos(&layout, "priya"), Position { x: 11.0, y: 21.0 });
    assert_eq!(pos(&layout, "ravi"), Position { x: 2.0, y: 1.0 });
    assert_eq!(pos(&layout, "meena"), Position { x: 10.0, y: 1.0 });
    assert_eq!(layout.width, 50.0);
    assert_eq!(layout.height, 40.0);
}
