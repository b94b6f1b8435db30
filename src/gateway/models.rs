//! Declared shapes of gateway responses.

use std::sync::{Arc, LazyLock};

use crate::mapper::{FieldType, Schema};

/// Gateway identity and limits (`get_gateway_info`).
pub static GATEWAY_INFO: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::named("GatewayInfo")
        .field("cli_version", FieldType::String)
        .field("version", FieldType::String)
        .field("spdk_version", FieldType::String)
        .field("name", FieldType::String)
        .field("group", FieldType::String)
        .field("addr", FieldType::String)
        .field("port", FieldType::String)
        .field("load_balancing_group", FieldType::Integer)
        .field("bool_status", FieldType::Boolean)
        .field("hostname", FieldType::String)
        .field("max_subsystems", FieldType::Integer)
        .field("max_namespaces", FieldType::Integer)
        .field("max_hosts_per_subsystem", FieldType::Integer)
        .field("status", FieldType::Integer)
        .field("error_message", FieldType::String)
        .build()
});

/// One entry of `list_subsystems`.
pub static SUBSYSTEM: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::named("Subsystem")
        .field("nqn", FieldType::String)
        .field("enable_ha", FieldType::Boolean)
        .field("serial_number", FieldType::String)
        .field("model_number", FieldType::String)
        .field("min_cntlid", FieldType::Integer)
        .field("max_cntlid", FieldType::Integer)
        .field("namespace_count", FieldType::Integer)
        .field("subtype", FieldType::String)
        .field("max_namespaces", FieldType::Integer)
        .field("has_dhchap_key", FieldType::Boolean)
        .field("allow_any_host", FieldType::Boolean)
        .build()
});

/// One namespace of a subsystem.
pub static NAMESPACE: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::named("Namespace")
        .field("nsid", FieldType::Integer)
        .field("uuid", FieldType::String)
        .field("bdev_name", FieldType::String)
        .field("rbd_image_name", FieldType::String)
        .field("rbd_pool_name", FieldType::String)
        .field("load_balancing_group", FieldType::Integer)
        .field("rbd_image_size", FieldType::Integer)
        .field("block_size", FieldType::Integer)
        .field("rw_ios_per_second", FieldType::Integer)
        .field("rw_mbytes_per_second", FieldType::Integer)
        .field("r_mbytes_per_second", FieldType::Integer)
        .field("w_mbytes_per_second", FieldType::Integer)
        .field("auto_visible", FieldType::Boolean)
        .field("hosts", FieldType::sequence_of(FieldType::String))
        .build()
});

/// Namespaces of one subsystem (`list_namespaces`).
pub static NAMESPACE_LIST: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::named("NamespaceList")
        .field("status", FieldType::Integer)
        .field("error_message", FieldType::String)
        .field("subsystem_nqn", FieldType::String)
        .field("namespaces", FieldType::sequence_of(FieldType::record(&NAMESPACE)))
        .build()
});

/// Result of `namespace_add`.
pub static NSID_STATUS: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::named("NsidStatus")
        .field("status", FieldType::Integer)
        .field("error_message", FieldType::String)
        .field("nsid", FieldType::Integer)
        .build()
});

/// One entry of `list_listeners`.
pub static LISTENER: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::named("Listener")
        .field("host_name", FieldType::String)
        .field("trtype", FieldType::String)
        .field("adrfam", FieldType::String)
        .field("traddr", FieldType::String)
        .field("trsvcid", FieldType::Integer)
        .field("secure", FieldType::Boolean)
        .build()
});

/// One allowed host of a subsystem.
pub static HOST: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::named("Host")
        .field("nqn", FieldType::String)
        .field("use_psk", FieldType::Boolean)
        .field("use_dhchap", FieldType::Boolean)
        .build()
});

/// Allowed hosts of one subsystem (`list_hosts`).
pub static HOSTS_INFO: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::named("HostsInfo")
        .field("status", FieldType::Integer)
        .field("error_message", FieldType::String)
        .field("allow_any_host", FieldType::Boolean)
        .field("subsystem_nqn", FieldType::String)
        .field("hosts", FieldType::sequence_of(FieldType::record(&HOST)))
        .build()
});

/// One entry of `list_connections`.
pub static CONNECTION: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::named("Connection")
        .field("nqn", FieldType::String)
        .field("traddr", FieldType::String)
        .field("trsvcid", FieldType::Integer)
        .field("trtype", FieldType::String)
        .field("adrfam", FieldType::String)
        .field("connected", FieldType::Boolean)
        .field("qpairs_count", FieldType::Integer)
        .field("controller_id", FieldType::Integer)
        .field("use_psk", FieldType::Boolean)
        .field("use_dhchap", FieldType::Boolean)
        .field("subsystem", FieldType::String)
        .build()
});
