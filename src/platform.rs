use crate::app::{AtomError, AtomOptions, AtomResult, DurationRange};
use crate::physics::elements::PeriodicTable;
use crate::renderer::engine::SmilEngine;
use crate::renderer::renderer::AtomRenderer;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// 난수 시드가 주어지면 재현 가능한 출력을 만든다
fn random_source(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// 네이티브 커맨드라인 인자
#[derive(Clone, Debug, PartialEq)]
pub struct CliArgs {
    pub options: AtomOptions,
    pub seed: Option<u64>,
    pub report: bool,
}

const USAGE: &str = "usage: bohr-atom <periodic-number> [--fixed] [--static] [--style] \
[--min SECONDS] [--max SECONDS] [--seed N] [--options FILE] [--report]";

impl CliArgs {
    pub fn parse<I>(args: I) -> AtomResult<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let mut options: Option<AtomOptions> = None;
        let mut number: Option<u32> = None;
        let mut duration = None::<DurationRange>;
        let (mut min, mut max) = (None, None);
        let (mut fixed, mut frozen, mut style) = (false, false, false);
        let mut seed = None;
        let mut report = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--fixed" => fixed = true,
                "--static" => frozen = true,
                "--style" => style = true,
                "--report" => report = true,
                "--min" => min = Some(parse_value::<u32>(&arg, args.next())?),
                "--max" => max = Some(parse_value::<u32>(&arg, args.next())?),
                "--seed" => seed = Some(parse_value::<u64>(&arg, args.next())?),
                "--options" => {
                    let path = args.next().ok_or_else(|| missing_value(&arg))?;
                    let json = std::fs::read_to_string(&path).map_err(|e| {
                        AtomError::InvalidConfiguration(format!("cannot read {path}: {e}"))
                    })?;
                    let parsed = AtomOptions::from_json(&json)?;
                    duration = Some(parsed.animation_duration);
                    options = Some(parsed);
                }
                "-h" | "--help" => return Err(AtomError::InvalidConfiguration(USAGE.to_owned())),
                other if other.starts_with('-') => {
                    return Err(AtomError::InvalidConfiguration(format!(
                        "unknown flag {other}\n{USAGE}"
                    )));
                }
                other => number = Some(parse_value::<u32>("periodic number", Some(other.to_owned()))?),
            }
        }

        let mut options = match (options, number) {
            (Some(mut options), Some(number)) => {
                options.element_periodic_number = f64::from(number);
                options
            }
            (Some(options), None) => options,
            (None, Some(number)) => AtomOptions::new("#atom", number),
            (None, None) => return Err(AtomError::InvalidConfiguration(USAGE.to_owned())),
        };

        // 헤드리스 문서에는 컨테이너가 하나뿐이다
        options.container_selector = "#atom".to_owned();
        options.fixed_view_box |= fixed;
        options.embed_style |= style;
        if frozen {
            options.animated = false;
        }
        let base = duration.unwrap_or_default();
        options.animation_duration =
            DurationRange::new(min.unwrap_or(base.minimum), max.unwrap_or(base.maximum));

        Ok(Self {
            options,
            seed,
            report,
        })
    }
}

fn missing_value(flag: &str) -> AtomError {
    AtomError::InvalidConfiguration(format!("{flag} expects a value"))
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: Option<String>) -> AtomResult<T> {
    let value = value.ok_or_else(|| missing_value(flag))?;
    value
        .parse()
        .map_err(|_| AtomError::InvalidConfiguration(format!("invalid {flag}: {value}")))
}

/// 헤드리스 문서에 원자를 그리고 SVG 마크업(또는 JSON 리포트)을 돌려준다
pub fn render_headless(args: &CliArgs) -> AtomResult<String> {
    use crate::renderer::headless::HeadlessDocument;

    let mut document = HeadlessDocument::new();
    let container = document.add_container("atom");
    let mut renderer = AtomRenderer::new(PeriodicTable, random_source(args.seed));
    let report = renderer.render(&mut document, &mut SmilEngine::new(), &args.options)?;

    if args.report {
        serde_json::to_string_pretty(&report)
            .map_err(|e| AtomError::Surface(format!("cannot serialize report: {e}")))
    } else {
        Ok(document.inner_markup(container))
    }
}

/// 네이티브 플랫폼 시작 함수
#[cfg(not(target_arch = "wasm32"))]
pub fn start() {
    env_logger::init();

    let output = CliArgs::parse(std::env::args().skip(1)).and_then(|args| render_headless(&args));
    match output {
        Ok(output) => println!("{output}"),
        Err(e) => {
            log::error!("{e}");
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

// wasm32 타겟에서 필요한 import들
#[cfg(target_arch = "wasm32")]
use {
    crate::constants::SVG_NAMESPACE,
    crate::renderer::surface::{ContainerProvider, ShapeNode, Surface},
    std::cell::{Cell, RefCell},
    wasm_bindgen::prelude::*,
};

// 페이지 하나에 엔진 하나: 재렌더링 시 같은 컨테이너의 타임라인만 정리한다
#[cfg(target_arch = "wasm32")]
thread_local! {
    static ENGINE: RefCell<SmilEngine> = RefCell::new(SmilEngine::new());
    static NEXT_CONTAINER_KEY: Cell<u32> = const { Cell::new(0) };
}

#[cfg(target_arch = "wasm32")]
const CONTAINER_KEY_ATTRIBUTE: &str = "data-atom-key";

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    if console_log::init_with_level(log::Level::Debug).is_err() {
        web_sys::console::warn_1(&"logger was already initialized".into());
    }
    console_error_panic_hook::set_once();
}

/// JS에서 호출하는 진입점: `animateAtom({ containerSelector, elementPeriodicNumber, ... })`
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(js_name = animateAtom)]
pub fn animate_atom(options: JsValue) -> Result<JsValue, JsValue> {
    let json = String::from(js_sys::JSON::stringify(&options)?);
    let options = AtomOptions::from_json(&json)?;

    let mut document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| AtomError::Surface("no document available".to_owned()))?;

    let mut renderer = AtomRenderer::new(PeriodicTable, random_source(None));
    let report =
        ENGINE.with_borrow_mut(|engine| renderer.render(&mut document, engine, &options))?;

    let report = serde_json::to_string(&report)
        .map_err(|e| AtomError::Surface(format!("cannot serialize report: {e}")))?;
    js_sys::JSON::parse(&report)
}

#[cfg(target_arch = "wasm32")]
fn js_error(error: JsValue) -> AtomError {
    AtomError::Surface(format!("{error:?}"))
}

/// 브라우저 DOM 요소를 컨테이너로 쓰는 Surface 구현
#[cfg(target_arch = "wasm32")]
pub struct DomContainer {
    document: web_sys::Document,
    root: web_sys::Element,
    key: String,
}

#[cfg(target_arch = "wasm32")]
impl Surface for DomContainer {
    type Node = web_sys::Element;

    fn key(&self) -> String {
        self.key.clone()
    }

    fn clear(&mut self) -> AtomResult<()> {
        self.root.set_inner_html("");
        Ok(())
    }

    fn append(
        &mut self,
        parent: Option<&web_sys::Element>,
        shape: &ShapeNode,
    ) -> AtomResult<web_sys::Element> {
        let node = self
            .document
            .create_element_ns(Some(SVG_NAMESPACE), shape.tag)
            .map_err(js_error)?;
        // createElementNS already sets the namespace
        for (name, value) in shape.attributes.iter().filter(|(name, _)| *name != "xmlns") {
            node.set_attribute(name, value).map_err(js_error)?;
        }
        if let Some(text) = &shape.text {
            node.set_text_content(Some(text));
        }
        parent
            .unwrap_or(&self.root)
            .append_child(&node)
            .map_err(js_error)?;
        Ok(node)
    }

    fn set_attribute(&mut self, node: &web_sys::Element, name: &str, value: &str) -> AtomResult<()> {
        node.set_attribute(name, value).map_err(js_error)
    }
}

#[cfg(target_arch = "wasm32")]
impl ContainerProvider for web_sys::Document {
    type Container<'a> = DomContainer;

    fn query(&mut self, selector: &str) -> Option<DomContainer> {
        let root = self.query_selector(selector).ok().flatten()?;
        // 컨테이너에 한 번 붙인 키는 재조회해도 그대로 유지된다
        let key = match root.get_attribute(CONTAINER_KEY_ATTRIBUTE) {
            Some(key) => key,
            None => {
                let key = NEXT_CONTAINER_KEY.with(|next| {
                    let id = next.get();
                    next.set(id.wrapping_add(1));
                    format!("dom:{id}")
                });
                root.set_attribute(CONTAINER_KEY_ATTRIBUTE, &key).ok()?;
                key
            }
        };
        Some(DomContainer {
            document: self.clone(),
            root,
            key,
        })
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|arg| (*arg).to_owned()).collect()
    }

    #[test]
    fn parses_flags_into_options() {
        let cli = CliArgs::parse(args(&[
            "6", "--fixed", "--static", "--style", "--min", "2", "--max", "5", "--seed", "9",
        ]))
        .unwrap();
        assert_eq!(cli.options.element_periodic_number, 6.0);
        assert!(cli.options.fixed_view_box);
        assert!(!cli.options.animated);
        assert!(cli.options.embed_style);
        assert_eq!(cli.options.animation_duration, DurationRange::new(2, 5));
        assert_eq!(cli.seed, Some(9));
        assert!(!cli.report);
    }

    #[test]
    fn rejects_missing_number_and_unknown_flags() {
        assert!(CliArgs::parse(args(&[])).is_err());
        assert!(CliArgs::parse(args(&["1", "--bogus"])).is_err());
        assert!(CliArgs::parse(args(&["carbon"])).is_err());
        assert!(CliArgs::parse(args(&["1", "--min"])).is_err());
    }

    #[test]
    fn headless_output_is_reproducible_with_a_seed() {
        let cli = CliArgs::parse(args(&["8", "--seed", "4"])).unwrap();
        let first = render_headless(&cli).unwrap();
        let second = render_headless(&cli).unwrap();
        assert_eq!(first, second);
        assert!(first.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
        assert_eq!(first.matches("<animateMotion").count(), 8);
    }

    #[test]
    fn report_is_json() {
        let cli = CliArgs::parse(args(&["1", "--report", "--seed", "1"])).unwrap();
        let json = render_headless(&cli).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["symbol"], "H");
        assert_eq!(value["layout"]["width"], 110.0);
        assert_eq!(value["orbits"][0]["orbit_id"], "orbit_1");
    }

    #[test]
    fn invalid_element_surfaces_as_error() {
        let cli = CliArgs::parse(args(&["119"])).unwrap();
        assert_eq!(
            render_headless(&cli).unwrap_err(),
            AtomError::InvalidElement("119".to_owned())
        );
    }
}
