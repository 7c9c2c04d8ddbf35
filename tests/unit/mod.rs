mod curve;
mod storage;
