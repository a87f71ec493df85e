#![forbid(unsafe_code)]

//! `regionmap` places fleets of machines on a world map.
//!
//! Marker groups name their nodes by region code or raw coordinates and pick a style preset
//! (or nothing at all); the pipeline resolves everything against a [`MapConfig`] and keeps
//! track of which groups the legend has switched on.
//!
//! # Features
//!
//! - `render`: enable projection, legend layout and SVG output (`regionmap::render`)

pub use regionmap_core::*;

#[cfg(feature = "render")]
pub mod render {
    pub use regionmap_render::land::{LandPaths, LandPolygons, NoLand, RawLandPaths};
    pub use regionmap_render::model::MapLayout;
    pub use regionmap_render::svg::SvgRenderOptions;
    pub use regionmap_render::text::{DeterministicTextMeasurer, TextMeasurer};
    pub use regionmap_render::{ComposeOptions, compose_map, project};

    use regionmap_core::{MapConfig, MapProps, MapSession};
    use std::sync::Arc;

    #[derive(Debug, thiserror::Error)]
    pub enum HeadlessError {
        #[error(transparent)]
        Input(#[from] regionmap_core::Error),
        #[error(transparent)]
        Render(#[from] regionmap_render::Error),
    }

    pub type Result<T> = std::result::Result<T, HeadlessError>;

    /// Converts an arbitrary string into a conservative SVG `id` token.
    ///
    /// The id prefixes gradient ids and scopes the embedded stylesheet, so two maps inlined in
    /// the same page must not share one.
    pub fn sanitize_svg_id(raw: &str) -> String {
        let raw = raw.trim();
        if raw.is_empty() {
            return "map-untitled".to_string();
        }

        let mut out = String::with_capacity(raw.len() + 4);
        for ch in raw.chars() {
            let ok = ch.is_ascii_alphanumeric() || ch == '-' || ch == '_';
            out.push(if ok { ch } else { '-' });
        }

        let starts_ok = out.chars().next().is_some_and(|c| c.is_ascii_alphabetic());
        if !starts_ok {
            out.insert_str(0, "map-");
        }

        while out.contains("--") {
            out = out.replace("--", "-");
        }
        let out = out.trim_matches('-');
        if out.is_empty() || out == "map" {
            return "map-untitled".to_string();
        }
        out.to_string()
    }

    /// Composes and writes SVG for an already mounted session.
    pub fn render_session_svg(
        session: &MapSession<'_>,
        land: &dyn LandPaths,
        compose: &ComposeOptions,
        svg: &SvgRenderOptions,
    ) -> Result<String> {
        let layout = compose_map(session, compose);
        Ok(regionmap_render::render_map_svg(&layout, land, svg)?)
    }

    /// One-shot render: mount, compose, write.
    pub fn render_svg(
        config: &MapConfig,
        props: MapProps,
        land: &dyn LandPaths,
        compose: &ComposeOptions,
        svg: &SvgRenderOptions,
    ) -> Result<String> {
        let session = MapSession::mount(config, props);
        render_session_svg(&session, land, compose, svg)
    }

    /// Bundles a configuration with the options used for every render.
    ///
    /// All work is CPU-bound and performs no I/O.
    #[derive(Clone)]
    pub struct MapRenderer {
        pub config: MapConfig,
        pub compose: ComposeOptions,
        pub svg: SvgRenderOptions,
        pub land: Arc<dyn LandPaths + Send + Sync>,
    }

    impl Default for MapRenderer {
        fn default() -> Self {
            Self {
                config: MapConfig::default(),
                compose: ComposeOptions::default(),
                svg: SvgRenderOptions::default(),
                land: Arc::new(LandPolygons::coarse_world()),
            }
        }
    }

    impl MapRenderer {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_config(mut self, config: MapConfig) -> Self {
            self.config = config;
            self
        }

        pub fn with_land(mut self, land: Arc<dyn LandPaths + Send + Sync>) -> Self {
            self.land = land;
            self
        }

        pub fn mount(&self, props: MapProps) -> MapSession<'_> {
            MapSession::mount(&self.config, props)
        }

        pub fn render_svg(&self, props: MapProps) -> Result<String> {
            render_svg(
                &self.config,
                props,
                self.land.as_ref(),
                &self.compose,
                &self.svg,
            )
        }

        pub fn render_svg_with_id(&self, mut props: MapProps, id: &str) -> Result<String> {
            props.id = Some(sanitize_svg_id(id));
            self.render_svg(props)
        }

        /// Renders groups straight from a JSON document (an array of groups or an object with
        /// `marker_groups`). Malformed nodes are skipped the same way unknown regions are.
        pub fn render_value_svg(
            &self,
            groups: &serde_json::Value,
            mut props: MapProps,
        ) -> Result<String> {
            let parsed = regionmap_core::parse_groups(groups)?;
            props.marker_groups = parsed.groups;
            self.render_svg(props)
        }
    }
}
