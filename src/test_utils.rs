//! Mock providers shared by the unit tests of the handlers and the
//! dispatcher.
