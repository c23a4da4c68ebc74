mod mod_config;
