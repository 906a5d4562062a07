use embassy_time::Duration;

/// Time allowed for the device to open, including the MBIM open handshake
pub fn open_timeout() -> Duration {
    Duration::from_secs(30)
}

/// Time allowed for `MBIM_CID_PIN` to complete
pub fn pin_timeout() -> Duration {
    Duration::from_secs(10)
}

/// Time allowed for a single `MBIM_CID_REGISTER_STATE` poll
pub fn register_state_timeout() -> Duration {
    Duration::from_secs(10)
}

/// Time allowed for `MBIM_CID_PACKET_SERVICE` attach
///
/// NOTE: Attach involves the network, some operators take well over a minute
pub fn packet_service_timeout() -> Duration {
    Duration::from_secs(120)
}

/// Time allowed for `MBIM_CID_CONNECT` context (de)activation
pub fn connect_timeout() -> Duration {
    Duration::from_secs(120)
}

/// Time allowed for `MBIM_CID_IP_CONFIGURATION`
pub fn ip_configuration_timeout() -> Duration {
    Duration::from_secs(60)
}

/// Time allowed for the device to close
pub fn close_timeout() -> Duration {
    Duration::from_secs(15)
}
