pub mod city;
pub mod major;
pub mod school;
pub mod student;
