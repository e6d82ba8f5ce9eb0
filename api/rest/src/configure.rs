use actix_files::Files;
use actix_web::web;
use lb_asset::{storage::PUBLIC_PREFIX, AssetKind, AssetStorage};

use crate::service::{
    client::client_api, contact::contact_api, newsletter::newsletter_api, project::project_api,
    root::root_api,
};

pub fn configure(cfg: &mut web::ServiceConfig, storage: &AssetStorage) {
    cfg.configure(root_api).service(
        web::scope("/api")
            .configure(project_api)
            .configure(client_api)
            .configure(contact_api)
            .configure(newsletter_api),
    );

    // Only finalized assets are public; the scratch directory stays hidden.
    for kind in AssetKind::ALL {
        cfg.service(Files::new(
            &format!("{PUBLIC_PREFIX}/{}", kind.dir_name()),
            storage.kind_dir(kind),
        ));
    }
}
