pub mod tool_config_dto;
