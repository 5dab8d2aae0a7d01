mod annotations;
mod types;
mod validator;

pub use annotations::{parse_pilot_flag, ClusterAnnotations};
pub use types::{
    ClusterRecord, ServerEndpoint, ACCESS_CONFIG_FILE_ANNOTATION, CLUSTER_KIND,
    PILOT_CFG_STORE_ANNOTATION, PILOT_ENDPOINT_ANNOTATION, PLATFORM_ANNOTATION,
};
pub use validator::ClusterValidator;
