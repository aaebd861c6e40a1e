//! Halo Orbit entry point
//!
//! On the web the page's render loop drives an exported `HaloApp`. Natively
//! there is no renderer; the binary plays the scene headlessly and logs it.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;

    use halo_orbit::platform;
    use halo_orbit::renderer::{BloomSettings, KEY_LIGHTS};
    use halo_orbit::scene::{
        Aabb, AssetLoader, AssetTicket, FontHandle, LoadTiming, LoadedMesh, Scene,
    };
    use halo_orbit::settings::SceneSettings;
    use halo_orbit::share::ShareToast;

    // Asset requests are forwarded to the page's loaders
    #[wasm_bindgen(inline_js = "
        export function request_mesh(url, ticket) {
            window.dispatchEvent(new CustomEvent('halo:load-mesh', { detail: { url, ticket } }));
        }
        export function request_font(path, ticket) {
            window.dispatchEvent(new CustomEvent('halo:load-font', { detail: { path, ticket } }));
        }
    ")]
    extern "C" {
        fn request_mesh(url: &str, ticket: u32);
        fn request_font(path: &str, ticket: u32);
    }

    struct PageLoader;

    impl AssetLoader for PageLoader {
        fn load_mesh(&mut self, url: &str, ticket: AssetTicket) {
            request_mesh(url, ticket.0);
        }

        fn load_font(&mut self, path: &str, ticket: AssetTicket) {
            request_font(path, ticket.0);
        }
    }

    /// Scene handle owned by the page
    #[wasm_bindgen]
    pub struct HaloApp {
        scene: Scene,
        toast: Rc<RefCell<ShareToast>>,
        last_color: String,
    }

    #[wasm_bindgen]
    impl HaloApp {
        #[wasm_bindgen(constructor)]
        pub fn new() -> HaloApp {
            let settings = platform::initial_settings();
            platform::apply_glow_variables(&settings);
            let last_color = settings.color.clone();

            let mut scene = Scene::new(settings, LoadTiming::QUICK);
            scene.sync_assets(&mut PageLoader);
            HaloApp {
                scene,
                toast: Rc::new(RefCell::new(ShareToast::new())),
                last_color,
            }
        }

        /// Advance one frame; returns the frame description as JSON
        pub fn frame(&mut self, dt: f32) -> String {
            self.toast.borrow_mut().tick(dt);
            let view = self.scene.frame(dt);
            serde_json::to_string(&view).unwrap_or_default()
        }

        /// Instance buffer bytes for the orbiting characters
        pub fn instance_bytes(&mut self) -> Vec<u8> {
            let view = self.scene.view();
            halo_orbit::renderer::CharacterInstance::as_bytes(&view.instances()).to_vec()
        }

        /// Current settings as JSON
        pub fn settings(&self) -> String {
            serde_json::to_string(self.scene.settings()).unwrap_or_default()
        }

        /// Replace settings from the control panel (JSON); bad input is ignored
        pub fn set_settings(&mut self, json: &str) {
            match serde_json::from_str::<SceneSettings>(json) {
                Ok(settings) => {
                    self.scene.set_settings(settings);
                    if self.scene.settings().color != self.last_color {
                        platform::apply_glow_variables(self.scene.settings());
                        self.last_color = self.scene.settings().color.clone();
                    }
                    self.scene.sync_assets(&mut PageLoader);
                }
                Err(e) => log::warn!("Ignoring settings update: {e}"),
            }
        }

        pub fn mesh_loaded(&mut self, ticket: u32, min: Vec<f32>, max: Vec<f32>) {
            let bounds = match (min.as_slice(), max.as_slice()) {
                ([a, b, c], [x, y, z]) => Some(Aabb::new(
                    glam::Vec3::new(*a, *b, *c),
                    glam::Vec3::new(*x, *y, *z),
                )),
                _ => None,
            }
            .filter(Aabb::is_valid);
            self.scene
                .mesh_loaded(AssetTicket(ticket), LoadedMesh { bounds });
        }

        pub fn font_loaded(&mut self, ticket: u32, handle: u32) {
            self.scene
                .font_loaded(AssetTicket(ticket), FontHandle(handle));
        }

        /// Fixed lights around the object as JSON
        pub fn key_lights(&self) -> String {
            serde_json::to_string(&KEY_LIGHTS).unwrap_or_default()
        }

        pub fn bloom(&self, viewport_width: u32) -> String {
            serde_json::to_string(&BloomSettings::for_viewport(viewport_width))
                .unwrap_or_default()
        }

        /// Copy a share link; the toast message updates when the write settles
        pub fn share(&self) -> String {
            let url = platform::current_share_url(self.scene.settings());
            let toast = self.toast.clone();
            let link = url.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let outcome = platform::copy_to_clipboard(&link).await;
                toast.borrow_mut().show(outcome);
            });
            log::info!("Share link: {url}");
            url
        }

        pub fn share_message(&self) -> Option<String> {
            self.toast.borrow().message().map(str::to_string)
        }
    }

    impl Default for HaloApp {
        fn default() -> Self {
            Self::new()
        }
    }

    pub fn init() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
        log::info!("Halo Orbit starting...");
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::init();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use glam::Vec3;
    use halo_orbit::scene::{
        Aabb, AssetLoader, AssetTicket, FontHandle, LoadTiming, LoadedMesh, Scene,
    };

    /// Resolves every request immediately with placeholder assets
    #[derive(Default)]
    struct InstantLoader {
        mesh: Option<AssetTicket>,
        font: Option<AssetTicket>,
    }

    impl AssetLoader for InstantLoader {
        fn load_mesh(&mut self, _url: &str, ticket: AssetTicket) {
            self.mesh = Some(ticket);
        }

        fn load_font(&mut self, _path: &str, ticket: AssetTicket) {
            self.font = Some(ticket);
        }
    }

    env_logger::init();
    log::info!("Halo Orbit (native) starting...");
    log::info!("Native mode has no renderer - serve the wasm build for the interactive scene");

    let settings = halo_orbit::platform::initial_settings();
    let mut scene = Scene::new(settings, LoadTiming::QUICK);
    let mut loader = InstantLoader::default();
    scene.sync_assets(&mut loader);

    if let Some(ticket) = loader.mesh {
        let bounds = Aabb::new(Vec3::new(-0.8, -0.8, -0.8), Vec3::new(0.8, 0.8, 0.8));
        scene.mesh_loaded(ticket, LoadedMesh { bounds: Some(bounds) });
    }
    if let Some(ticket) = loader.font {
        scene.font_loaded(ticket, FontHandle(0));
    }

    let dt = 1.0 / 60.0;
    let mut view = scene.frame(dt);
    for _ in 0..(3 * 60) {
        view = scene.frame(dt);
    }

    println!("text:      {:?}", scene.displayed_text());
    println!("lights:    {} key + {} accent", halo_orbit::renderer::KEY_LIGHTS.len(), view.lights.len());
    println!("phase:     {:?}", scene.load_phase());
    println!("content y: {:.4}", view.content_y);
    println!("angle:     {:.4} rad", scene.orbit().current_angle);
    for c in view.characters.iter().take(4) {
        let p = c.world.transform_point3(Vec3::ZERO);
        println!("  {:?} at ({:.3}, {:.3}, {:.3})", c.glyph, p.x, p.y, p.z);
    }
    println!(
        "share:     {}",
        halo_orbit::platform::current_share_url(scene.settings())
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
