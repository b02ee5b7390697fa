//! Cross-module tests that run whole forecast pages through the pipeline.

mod pipeline_tests;
