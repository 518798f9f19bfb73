#![allow(clippy::expect_used, reason = "Fine in tests")]
use lectern_deck::{
  ClassRenderer,
  Command,
  IndexBase,
  Location,
  MemorySurface,
  Navigator,
  SlideParam,
  UrlLocation,
  tags::{CURRENT, PREVIOUS},
};
use proptest::prelude::*;

type HeadlessNavigator = Navigator<ClassRenderer<MemorySurface>, UrlLocation>;

fn headless(slides: usize, url: &str, param: SlideParam) -> HeadlessNavigator {
  let mut navigator = Navigator::new(
    slides,
    ClassRenderer::new(MemorySurface::new(slides)),
    UrlLocation::parse(url).expect("valid test URL"),
    param,
  );
  navigator.initialize();
  navigator
}

fn command() -> impl Strategy<Value = Command> {
  prop_oneof![Just(Command::Next), Just(Command::Previous)]
}

#[test]
fn zero_based_convention_round_trips() {
  let param = SlideParam {
    name: "s".to_owned(),
    base: IndexBase::Zero,
  };
  let mut navigator = headless(4, "https://example.org/?s=2", param);
  assert_eq!(navigator.current_index(), 2);
  navigator.next();
  assert_eq!(navigator.location().query_param("s").as_deref(), Some("3"));
}

#[test]
fn out_of_range_start_is_clamped() {
  let navigator =
    headless(4, "https://example.org/?slide=40", SlideParam::default());
  assert_eq!(navigator.current_index(), 3);
  assert_eq!(
    navigator.location().query_param("slide").as_deref(),
    Some("4")
  );
}

proptest! {
  #![proptest_config(ProptestConfig::with_cases(128))]

  #[test]
  fn index_stays_in_range_and_tags_stay_exclusive(
    slides in 1usize..12,
    start in 0usize..20,
    commands in prop::collection::vec(command(), 0..40),
  ) {
    let url = format!("https://example.org/?slide={start}");
    let mut navigator = headless(slides, &url, SlideParam::default());

    for command in commands {
      navigator.dispatch(command);
      prop_assert!(navigator.current_index() < slides);

      let surface = navigator.renderer().surface();
      let current = surface.tagged(CURRENT);
      let previous = surface.tagged(PREVIOUS);
      prop_assert_eq!(current.clone(), vec![navigator.current_index()]);
      prop_assert!(previous.len() <= 1);
      prop_assert!(previous.iter().all(|index| !current.contains(index)));

      let expected = (navigator.current_index() + 1).to_string();
      prop_assert_eq!(
        navigator.location().query_param("slide"),
        Some(expected)
      );
    }
  }

  #[test]
  fn next_and_previous_are_inverse(
    slides in 1usize..12,
    start in 1usize..12,
    forward_first in any::<bool>(),
  ) {
    let url = format!("https://example.org/?slide={start}");
    let mut navigator = headless(slides, &url, SlideParam::default());
    let before = navigator.current_index();

    if forward_first {
      navigator.next();
      navigator.previous();
    } else {
      navigator.previous();
      navigator.next();
    }
    prop_assert_eq!(navigator.current_index(), before);
  }
}
