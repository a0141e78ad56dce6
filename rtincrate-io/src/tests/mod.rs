//! Test modules for rtincrate-io

mod terrain_rgb_tests;
