mod active_clients;

pub(crate) use active_clients::ActiveClientRegistry;
