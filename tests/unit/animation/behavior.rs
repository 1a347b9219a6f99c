use super::*;

const TANK: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
  <script data-behavior="liquid-level" data-variable="waterLevel" data-default="65"/>
  <rect id="tank-body" x="10" y="10" width="80" height="80" fill="none" stroke="#333"/>
  <rect id="tank-liquid" x="10" y="10" width="80" height="80" fill="#2196f3"/>
</svg>"##;

#[test]
fn finds_declared_behavior() {
    let doc = SvgDocument::parse(TANK).unwrap();
    let decl = find_declaration(&doc).unwrap();
    assert_eq!(decl.name, LIQUID_LEVEL_BEHAVIOR);
    assert_eq!(decl.variable, "waterLevel");
    assert_eq!(doc.local_name(decl.script), Some("script"));
}

#[test]
fn plain_scripts_declare_nothing() {
    let doc = SvgDocument::parse(
        r#"<svg xmlns="http://www.w3.org/2000/svg"><script>alert(1)</script></svg>"#,
    )
    .unwrap();
    assert!(find_declaration(&doc).is_none());
}

#[test]
fn level_behavior_drives_liquid_through_its_variable() {
    let mut doc = SvgDocument::parse(TANK).unwrap();
    let decl = find_declaration(&doc).unwrap();
    let reg = BehaviorRegistry::with_builtins();
    let mut b = reg.create(&decl.name, &doc, decl.script).unwrap();
    assert_eq!(b.default_value(&doc), Some(65.0));

    assert!(!b.set_variable(&mut doc, "level", 10.0));
    assert!(b.set_variable(&mut doc, "waterLevel", 25.0));
    let liquid = doc.find_by_id("tank-liquid").unwrap();
    assert_eq!(doc.attr(liquid, "height"), Some("20"));
    assert_eq!(doc.attr(liquid, "y"), Some("70"));
    assert!(!b.update_progress(&mut doc, 50.0));
}

#[test]
fn unknown_names_do_not_resolve() {
    let doc = SvgDocument::parse(TANK).unwrap();
    let reg = BehaviorRegistry::with_builtins();
    assert!(!reg.contains("mixer"));
    assert!(reg.create("mixer", &doc, doc.root()).is_none());
    assert!(BehaviorRegistry::empty()
        .create(LIQUID_LEVEL_BEHAVIOR, &doc, doc.root())
        .is_none());
}

#[test]
fn custom_factories_can_be_registered() {
    struct Fixed;
    impl Animatable for Fixed {
        fn set_variable(&mut self, _: &mut SvgDocument, _: &str, _: f64) -> bool {
            true
        }
        fn default_value(&self, _: &SvgDocument) -> Option<f64> {
            Some(12.0)
        }
    }
    let mut reg = BehaviorRegistry::empty();
    reg.register("fixed", |_, _| Some(Box::new(Fixed)));
    let doc = SvgDocument::parse(TANK).unwrap();
    let b = reg.create("fixed", &doc, doc.root()).unwrap();
    assert_eq!(b.default_value(&doc), Some(12.0));
}

#[test]
fn null_behavior_handles_nothing() {
    let mut doc = SvgDocument::parse(TANK).unwrap();
    let mut b = NullBehavior;
    assert!(!b.set_variable(&mut doc, "level", 1.0));
    assert!(!b.update_liquid(&mut doc, 1.0));
    assert_eq!(b.default_value(&doc), None);
}
