pub mod java_mapper;
