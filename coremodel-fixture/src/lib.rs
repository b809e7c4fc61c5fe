//! The coremodels of `lineages/` and their registry, as generated by the
//! build script.

pub mod coremodel {
    pub mod panel {
        include!(concat!(
            env!("OUT_DIR"),
            "/pkg/coremodel/panel/coremodel_gen.inc.rs"
        ));
    }

    pub mod playlist {
        include!(concat!(
            env!("OUT_DIR"),
            "/pkg/coremodel/playlist/coremodel_gen.inc.rs"
        ));
    }

    pub mod schema {
        include!(concat!(
            env!("OUT_DIR"),
            "/pkg/coremodel/schema/coremodel_gen.inc.rs"
        ));
    }
}

pub mod staticregistry {
    include!(concat!(
        env!("OUT_DIR"),
        "/pkg/framework/coremodel/staticregistry/registry_gen.inc.rs"
    ));
}
