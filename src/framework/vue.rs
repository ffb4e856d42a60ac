//! Vue 3 + Vite profile.
//!
//! ## Output Layout
//!
//! ```text
//! out/
//! ├── package.json          # vue, vue-router, vite, @vitejs/plugin-vue
//! ├── vite.config.js        # plugin-vue enabled
//! ├── index.html            # #app mount point + /src/main.js module
//! ├── public/               # Static files, served from /
//! └── src/
//!     ├── main.js           # createApp(App).use(router).mount('#app')
//!     ├── App.vue           # <router-view /> only
//!     ├── router.js         # One route per page, discovery order
//!     ├── assets/
//!     │   └── styles/       # Stylesheets under the external policy
//!     ├── components/
//!     │   ├── Nav.vue
//!     │   └── Footer.vue
//!     └── pages/
//!         ├── index.vue
//!         └── about.vue
//! ```
//!
//! Pages use `<script setup>`, so the functions of the associated script and
//! the imported components are visible to the template without any export
//! boilerplate.

use super::{FrameworkProfile, PageView, ScaffoldFile, StyleBlock};
use crate::config::ConvertConfig;
use crate::markup::TemplateSyntax;
use crate::naming::js_single_quoted;
use crate::types::{ComponentUnit, RouteEntry};
use maud::{DOCTYPE, Markup, html};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

pub const SYNTAX: TemplateSyntax = TemplateSyntax {
    link_element: "router-link",
    link_target: "to",
    click_binding: "@click",
};

const PAGES_DIR: &str = "src/pages";
const COMPONENTS_DIR: &str = "src/components";
const PUBLIC_DIR: &str = "public";
const STYLES_DIR: &str = "src/assets/styles";

const MAIN_JS: &str = "import { createApp } from 'vue';
import App from './App.vue';
import router from './router';

createApp(App).use(router).mount('#app');
";

const APP_VUE: &str = "<template>
  <router-view />
</template>
";

const VITE_CONFIG: &str = "import { defineConfig } from 'vite';
import vue from '@vitejs/plugin-vue';

export default defineConfig({
  plugins: [vue()],
});
";

#[derive(Debug, Clone, Copy, Default)]
pub struct VueProfile;

impl FrameworkProfile for VueProfile {
    fn id(&self) -> &'static str {
        "vue"
    }

    fn syntax(&self) -> TemplateSyntax {
        SYNTAX
    }

    fn page_path(&self, base_name: &str) -> PathBuf {
        PathBuf::from(PAGES_DIR).join(format!("{base_name}.vue"))
    }

    fn component_path(&self, name: &str) -> PathBuf {
        PathBuf::from(COMPONENTS_DIR).join(format!("{name}.vue"))
    }

    fn render_page(&self, page: &PageView) -> String {
        let mut out = String::from("<template>\n  <div>\n");
        for name in &page.top {
            out.push_str(&format!("    <{name} />\n"));
        }
        let markup = page.markup.trim();
        if !markup.is_empty() {
            out.push_str(markup);
            out.push('\n');
        }
        for name in &page.bottom {
            out.push_str(&format!("    <{name} />\n"));
        }
        out.push_str("  </div>\n</template>\n\n");

        let imports: Vec<String> = page
            .top
            .iter()
            .chain(&page.bottom)
            .map(|name| {
                format!(
                    "import {name} from {};",
                    js_single_quoted(&format!("../components/{name}.vue"))
                )
            })
            .collect();
        let script = page.script.trim();
        out.push_str("<script setup>\n");
        if !imports.is_empty() {
            out.push_str(&imports.join("\n"));
            out.push('\n');
            if !script.is_empty() {
                out.push('\n');
            }
        }
        if !script.is_empty() {
            out.push_str(script);
            out.push('\n');
        }
        out.push_str("</script>\n\n");

        match &page.style {
            StyleBlock::Inline(css) => out.push_str(&style_block(css)),
            StyleBlock::External(paths) if paths.is_empty() => out.push_str(&style_block("")),
            StyleBlock::External(paths) => {
                let blocks: Vec<String> = paths
                    .iter()
                    .map(|p| format!("<style scoped src=\"../assets/styles/{p}\"></style>\n"))
                    .collect();
                out.push_str(&blocks.join("\n"));
            }
        }
        out
    }

    fn render_component(&self, component: &ComponentUnit) -> String {
        format!(
            "<template>\n{}\n</template>\n\n{}",
            component.template.trim(),
            style_block("")
        )
    }

    fn render_router(&self, routes: &[RouteEntry]) -> String {
        let mut out = String::from("import { createRouter, createWebHistory } from 'vue-router';\n");
        for route in routes {
            out.push_str(&format!(
                "import {} from {};\n",
                route.ident,
                js_single_quoted(&format!("./pages/{}.vue", route.page))
            ));
        }
        out.push('\n');

        if routes.is_empty() {
            out.push_str("const routes = [];\n");
        } else {
            let entries: Vec<String> = routes
                .iter()
                .map(|route| {
                    format!(
                        "  {{\n    path: {},\n    name: {},\n    component: {}\n  }}",
                        js_single_quoted(&route.path),
                        js_single_quoted(&route.name),
                        route.ident
                    )
                })
                .collect();
            out.push_str(&format!("const routes = [\n{}\n];\n", entries.join(",\n")));
        }

        out.push_str(
            "
const router = createRouter({
  history: createWebHistory(),
  routes
});

export default router;
",
        );
        out
    }

    fn scaffold_files(
        &self,
        routes: &[RouteEntry],
        config: &ConvertConfig,
    ) -> Result<Vec<ScaffoldFile>, serde_json::Error> {
        let file = |path: &str, contents: String| ScaffoldFile {
            path: PathBuf::from(path),
            contents,
        };
        Ok(vec![
            file("package.json", package_json(config)?),
            file("vite.config.js", VITE_CONFIG.to_string()),
            file("index.html", index_html(&config.project.title).into_string() + "\n"),
            file("src/main.js", MAIN_JS.to_string()),
            file("src/App.vue", APP_VUE.to_string()),
            file("src/router.js", self.render_router(routes)),
        ])
    }

    fn asset_dirs(&self) -> &'static [&'static str] {
        &[PUBLIC_DIR, "src/assets"]
    }

    fn public_dir(&self) -> &'static str {
        PUBLIC_DIR
    }

    fn stylesheet_dir(&self) -> &'static str {
        STYLES_DIR
    }
}

fn style_block(css: &str) -> String {
    let css = css.trim();
    if css.is_empty() {
        "<style scoped>\n</style>\n".to_string()
    } else {
        format!("<style scoped>\n{css}\n</style>\n")
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PackageManifest<'a> {
    name: &'a str,
    private: bool,
    version: &'static str,
    #[serde(rename = "type")]
    module_type: &'static str,
    scripts: BTreeMap<&'static str, &'static str>,
    dependencies: BTreeMap<&'static str, &'a str>,
    dev_dependencies: BTreeMap<&'static str, &'a str>,
}

fn package_json(config: &ConvertConfig) -> Result<String, serde_json::Error> {
    let deps = &config.dependencies;
    let manifest = PackageManifest {
        name: &config.project.name,
        private: true,
        version: "0.0.0",
        module_type: "module",
        scripts: BTreeMap::from([
            ("build", "vite build"),
            ("dev", "vite"),
            ("preview", "vite preview"),
        ]),
        dependencies: BTreeMap::from([("vue", deps.vue.as_str()), ("vue-router", deps.vue_router.as_str())]),
        dev_dependencies: BTreeMap::from([
            ("@vitejs/plugin-vue", deps.plugin_vue.as_str()),
            ("vite", deps.vite.as_str()),
        ]),
    };
    Ok(serde_json::to_string_pretty(&manifest)? + "\n")
}

fn index_html(title: &str) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
            }
            body {
                div id="app" {}
                script type="module" src="/src/main.js" {}
            }
        }
    }
}
